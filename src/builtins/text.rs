//! Capability converter for types that decode themselves from text.

use instruct_core::{BoxError, NativeValue, RawValue, TypeInfo};

use crate::error::BuiltinError;
use crate::registry::CustomReflect;

/// Matches any destination exposing a [`TextDecoder`](instruct_core::TextDecoder)
/// and decodes the raw string with it.
pub fn text_decoder() -> CustomReflect {
    CustomReflect::new(
        |info: &TypeInfo| info.text_decoder.is_some(),
        |info: &TypeInfo, raw: &RawValue| -> Result<NativeValue, BoxError> {
            let text = raw.as_str().ok_or(BuiltinError::NotText)?;
            let decoder = info.text_decoder.ok_or(BuiltinError::NotText)?;
            decoder.decode(text)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn matches_only_decodable_types() {
        let entry = text_decoder();
        assert!(entry.matches(&TypeInfo::of::<IpAddr>()));
        assert!(!entry.matches(&TypeInfo::of::<String>()));
        assert!(!entry.matches(&TypeInfo::of::<Vec<u8>>()));
    }

    #[test]
    fn decodes_address() {
        let info = TypeInfo::of::<Ipv4Addr>();
        let mut dest = Ipv4Addr::UNSPECIFIED;
        text_decoder()
            .apply(&mut dest, &info, &RawValue::from("1.2.3.4"))
            .unwrap();
        assert_eq!(dest, Ipv4Addr::new(1, 2, 3, 4));
    }

    #[test]
    fn decode_failure_passes_through() {
        let info = TypeInfo::of::<Ipv4Addr>();
        let mut dest = Ipv4Addr::UNSPECIFIED;
        let err = text_decoder()
            .apply(&mut dest, &info, &RawValue::from("trick"))
            .unwrap_err();
        assert!(!err.is_unsupported());
        assert_eq!(dest, Ipv4Addr::UNSPECIFIED);
    }
}
