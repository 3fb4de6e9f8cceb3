//! Timestamp converter for `DateTime<Utc>`.

use chrono::{DateTime, NaiveDateTime, Utc};

use instruct_core::RawValue;

use crate::error::BuiltinError;
use crate::registry::CustomType;

/// Textual layout accepted by [`timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeLayout {
    /// `2021-10-22T11:01:00Z`
    #[default]
    Rfc3339,
    /// `Fri, 22 Oct 2021 11:01:00 +0000`
    Rfc2822,
    /// A `chrono` format string that includes an offset.
    Format(String),
    /// A `chrono` format string without an offset; the time is taken as UTC.
    NaiveFormat(String),
}

impl TimeLayout {
    pub fn parse(&self, text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        let parsed = match self {
            TimeLayout::Rfc3339 => DateTime::parse_from_rfc3339(text)?,
            TimeLayout::Rfc2822 => DateTime::parse_from_rfc2822(text)?,
            TimeLayout::Format(format) => DateTime::parse_from_str(text, format)?,
            TimeLayout::NaiveFormat(format) => {
                return NaiveDateTime::parse_from_str(text, format).map(|naive| naive.and_utc());
            }
        };
        Ok(parsed.with_timezone(&Utc))
    }
}

/// Exact-type converter for `DateTime<Utc>` using `layout`.
pub fn timestamp(layout: TimeLayout) -> CustomType {
    CustomType::new(move |raw: &RawValue| -> Result<DateTime<Utc>, BuiltinError> {
        let text = raw.as_str().ok_or(BuiltinError::NotText)?;
        Ok(layout.parse(text)?)
    })
}
