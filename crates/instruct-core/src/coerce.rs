//! Primitive coercion: text into scalar kinds.
//!
//! ## Supported Kinds
//!
//! - Boolean: `1 t T TRUE true True` and `0 f F FALSE false False`
//! - Integers: base-10, range-checked against the destination's bit width
//! - Floats: decimal or scientific notation, `inf` and `NaN`, parsed directly
//!   at the destination's width. Finite text too large for the width is out
//!   of range. Hexadecimal literals such as `0x1p-2` are not accepted.
//! - String: passed through
//!
//! ## Example
//!
//! ```
//! use instruct_core::{Kind, Scalar, coerce_scalar};
//!
//! assert_eq!(coerce_scalar(Kind::Int8, "5"), Ok(Scalar::Int8(5)));
//! assert!(coerce_scalar(Kind::Int8, "500").is_err());
//! ```

use std::num::IntErrorKind;
use std::str::FromStr;

use crate::{CoerceError, Kind, Scalar};

/// Convert `text` into a scalar of the given kind.
pub fn coerce_scalar(kind: Kind, text: &str) -> Result<Scalar, CoerceError> {
    match kind {
        Kind::Bool => parse_bool(text).map(Scalar::Bool),
        Kind::Int8 => parse_signed(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Int8),
        Kind::Int16 => parse_signed(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Int16),
        Kind::Int32 => parse_signed(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Int32),
        Kind::Int64 => parse_signed(kind, text).map(Scalar::Int64),
        Kind::Uint8 => parse_unsigned(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Uint8),
        Kind::Uint16 => parse_unsigned(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Uint16),
        Kind::Uint32 => parse_unsigned(kind, text).and_then(|v| narrow(kind, v)).map(Scalar::Uint32),
        Kind::Uint64 => parse_unsigned(kind, text).map(Scalar::Uint64),
        Kind::Float32 => parse_float::<f32>(kind, text).map(Scalar::Float32),
        Kind::Float64 => parse_float::<f64>(kind, text).map(Scalar::Float64),
        Kind::String => Ok(Scalar::String(text.to_owned())),
        other => Err(CoerceError::NotPrimitive(other)),
    }
}

fn parse_bool(text: &str) -> Result<bool, CoerceError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::InvalidSyntax { kind: Kind::Bool }),
    }
}

fn int_error(kind: Kind, error: &std::num::ParseIntError) -> CoerceError {
    match error.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::OutOfRange { kind },
        _ => CoerceError::InvalidSyntax { kind },
    }
}

fn parse_signed(kind: Kind, text: &str) -> Result<i64, CoerceError> {
    text.parse::<i64>().map_err(|e| int_error(kind, &e))
}

fn parse_unsigned(kind: Kind, text: &str) -> Result<u64, CoerceError> {
    // Unsigned literals carry no sign; `str::parse` would accept a leading '+'.
    if text.starts_with('+') {
        return Err(CoerceError::InvalidSyntax { kind });
    }
    text.parse::<u64>().map_err(|e| int_error(kind, &e))
}

fn narrow<S, T: TryFrom<S>>(kind: Kind, value: S) -> Result<T, CoerceError> {
    T::try_from(value).map_err(|_| CoerceError::OutOfRange { kind })
}

fn parse_float<F>(kind: Kind, text: &str) -> Result<F, CoerceError>
where
    F: FromStr + Copy + Into<f64>,
{
    let value: F = text.parse().map_err(|_| CoerceError::InvalidSyntax { kind })?;
    // `str::parse` rounds overflowing literals to infinity.
    if value.into().is_infinite() && !is_infinity_literal(text) {
        return Err(CoerceError::OutOfRange { kind });
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_forms() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(coerce_scalar(Kind::Bool, text), Ok(Scalar::Bool(true)), "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(coerce_scalar(Kind::Bool, text), Ok(Scalar::Bool(false)), "{text}");
        }
    }

    #[test]
    fn bool_rejects_other_text() {
        for text in ["trick", "yes", "tRuE", "", " true"] {
            assert_eq!(
                coerce_scalar(Kind::Bool, text),
                Err(CoerceError::InvalidSyntax { kind: Kind::Bool }),
                "{text}"
            );
        }
    }

    #[test]
    fn signed_integers() {
        assert_eq!(coerce_scalar(Kind::Int8, "5"), Ok(Scalar::Int8(5)));
        assert_eq!(coerce_scalar(Kind::Int8, "-128"), Ok(Scalar::Int8(-128)));
        assert_eq!(coerce_scalar(Kind::Int16, "+300"), Ok(Scalar::Int16(300)));
        assert_eq!(coerce_scalar(Kind::Int32, "-70000"), Ok(Scalar::Int32(-70000)));
        assert_eq!(
            coerce_scalar(Kind::Int64, "9223372036854775807"),
            Ok(Scalar::Int64(i64::MAX))
        );
    }

    #[test]
    fn signed_range_checks() {
        assert_eq!(
            coerce_scalar(Kind::Int8, "500"),
            Err(CoerceError::OutOfRange { kind: Kind::Int8 })
        );
        assert_eq!(
            coerce_scalar(Kind::Int8, "-129"),
            Err(CoerceError::OutOfRange { kind: Kind::Int8 })
        );
        assert_eq!(
            coerce_scalar(Kind::Int16, "40000"),
            Err(CoerceError::OutOfRange { kind: Kind::Int16 })
        );
        assert_eq!(
            coerce_scalar(Kind::Int64, "9223372036854775808"),
            Err(CoerceError::OutOfRange { kind: Kind::Int64 })
        );
    }

    #[test]
    fn unsigned_integers() {
        assert_eq!(coerce_scalar(Kind::Uint8, "255"), Ok(Scalar::Uint8(255)));
        assert_eq!(coerce_scalar(Kind::Uint16, "5"), Ok(Scalar::Uint16(5)));
        assert_eq!(coerce_scalar(Kind::Uint32, "4294967295"), Ok(Scalar::Uint32(u32::MAX)));
        assert_eq!(
            coerce_scalar(Kind::Uint64, "18446744073709551615"),
            Ok(Scalar::Uint64(u64::MAX))
        );
    }

    #[test]
    fn unsigned_rejects_sign_and_overflow() {
        assert_eq!(
            coerce_scalar(Kind::Uint8, "256"),
            Err(CoerceError::OutOfRange { kind: Kind::Uint8 })
        );
        assert_eq!(
            coerce_scalar(Kind::Uint8, "-1"),
            Err(CoerceError::InvalidSyntax { kind: Kind::Uint8 })
        );
        assert_eq!(
            coerce_scalar(Kind::Uint8, "+1"),
            Err(CoerceError::InvalidSyntax { kind: Kind::Uint8 })
        );
    }

    #[test]
    fn integers_reject_non_numeric() {
        for kind in [Kind::Int8, Kind::Int32, Kind::Uint16, Kind::Uint64] {
            assert_eq!(coerce_scalar(kind, "trick"), Err(CoerceError::InvalidSyntax { kind }));
            assert_eq!(coerce_scalar(kind, ""), Err(CoerceError::InvalidSyntax { kind }));
            assert_eq!(coerce_scalar(kind, "1.5"), Err(CoerceError::InvalidSyntax { kind }));
        }
    }

    #[test]
    fn floats() {
        assert_eq!(coerce_scalar(Kind::Float64, "5.5"), Ok(Scalar::Float64(5.5)));
        assert_eq!(coerce_scalar(Kind::Float32, "5.5"), Ok(Scalar::Float32(5.5)));
        assert_eq!(coerce_scalar(Kind::Float64, "1e3"), Ok(Scalar::Float64(1000.0)));
        assert_eq!(coerce_scalar(Kind::Float64, "-2.5E-1"), Ok(Scalar::Float64(-0.25)));
        assert_eq!(
            coerce_scalar(Kind::Float32, "inf"),
            Ok(Scalar::Float32(f32::INFINITY))
        );
    }

    #[test]
    fn float_errors() {
        assert_eq!(
            coerce_scalar(Kind::Float64, "trick"),
            Err(CoerceError::InvalidSyntax { kind: Kind::Float64 })
        );
        assert_eq!(
            coerce_scalar(Kind::Float32, "1e40"),
            Err(CoerceError::OutOfRange { kind: Kind::Float32 })
        );
        assert_eq!(coerce_scalar(Kind::Float64, "1e40"), Ok(Scalar::Float64(1e40)));
        assert_eq!(
            coerce_scalar(Kind::Float32, "-1e40"),
            Err(CoerceError::OutOfRange { kind: Kind::Float32 })
        );
        assert_eq!(
            coerce_scalar(Kind::Float64, "1e400"),
            Err(CoerceError::OutOfRange { kind: Kind::Float64 })
        );
    }

    #[test]
    fn float32_extremes() {
        assert_eq!(
            coerce_scalar(Kind::Float32, &f32::MAX.to_string()),
            Ok(Scalar::Float32(f32::MAX))
        );
        assert_eq!(coerce_scalar(Kind::Float32, "3.4028235e38"), Ok(Scalar::Float32(f32::MAX)));
        assert_eq!(
            coerce_scalar(Kind::Float32, "-3.4028235e38"),
            Ok(Scalar::Float32(f32::MIN))
        );
    }

    #[test]
    fn float32_rounds_once() {
        // Just below a tie; rounding through f64 first would round up.
        assert_eq!(
            coerce_scalar(Kind::Float32, "1.00000017881393432617187499"),
            Ok(Scalar::Float32(f32::from_bits(0x3f80_0001)))
        );
    }

    #[test]
    fn infinity_literals() {
        for text in ["inf", "+Inf", "-Infinity", "INFINITY"] {
            assert!(
                matches!(coerce_scalar(Kind::Float32, text), Ok(Scalar::Float32(v)) if v.is_infinite()),
                "{text}"
            );
            assert!(
                matches!(coerce_scalar(Kind::Float64, text), Ok(Scalar::Float64(v)) if v.is_infinite()),
                "{text}"
            );
        }
        assert!(matches!(coerce_scalar(Kind::Float32, "NaN"), Ok(Scalar::Float32(v)) if v.is_nan()));
    }

    #[test]
    fn hex_floats_are_rejected() {
        for kind in [Kind::Float32, Kind::Float64] {
            assert_eq!(coerce_scalar(kind, "0x1p-2"), Err(CoerceError::InvalidSyntax { kind }));
        }
    }

    #[test]
    fn string_passes_through() {
        assert_eq!(
            coerce_scalar(Kind::String, "any text"),
            Ok(Scalar::String("any text".into()))
        );
        assert_eq!(coerce_scalar(Kind::String, ""), Ok(Scalar::String(String::new())));
    }

    #[test]
    fn non_primitive_kinds() {
        for kind in [Kind::Pointer, Kind::Sequence, Kind::Struct, Kind::Other] {
            assert_eq!(coerce_scalar(kind, "1"), Err(CoerceError::NotPrimitive(kind)));
        }
    }

    #[test]
    fn scalar_kind_matches_request() {
        let scalar = coerce_scalar(Kind::Uint32, "7").unwrap();
        assert_eq!(scalar.kind(), Kind::Uint32);
    }
}
