//! Duration literals: `"300ms"`, `"1.5h"`, `"2h45m"`.
//!
//! A literal is an optional sign followed by one or more `<number><unit>`
//! components. Numbers may carry a fraction. Units are `ns`, `us` (also `µs`
//! and `μs`), `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit.
//!
//! The total must fit in `i64` nanoseconds. Negative totals are rejected
//! because `std::time::Duration` is unsigned.

use std::time::Duration;

use instruct_core::RawValue;

use crate::error::{BuiltinError, DurationError};
use crate::registry::CustomType;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

const MAX_NANOS: u128 = i64::MAX as u128;

/// Fraction digits past nanosecond precision of the largest unit are dropped.
const MAX_FRACTION_DIGITS: usize = 19;

/// Exact-type converter for [`Duration`].
pub fn duration() -> CustomType {
    CustomType::new(|raw: &RawValue| -> Result<Duration, BuiltinError> {
        let text = raw.as_str().ok_or(BuiltinError::NotText)?;
        Ok(parse_duration(text)?)
    })
}

/// Parse a duration literal.
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total: u128 = 0;
    let mut rest = body;
    while !rest.is_empty() {
        let (component, after) = parse_component(rest)?;
        total = total
            .checked_add(component)
            .filter(|total| *total <= MAX_NANOS)
            .ok_or(DurationError::Overflow)?;
        rest = after;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative);
    }
    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(nanos))
}

/// Parse one `<number><unit>` component, returning its nanoseconds and the
/// remaining input.
fn parse_component(text: &str) -> Result<(u128, &str), DurationError> {
    let (whole, rest) = split_digits(text);
    let (fraction, rest) = match rest.strip_prefix('.') {
        Some(after_dot) => split_digits(after_dot),
        None => ("", rest),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(DurationError::Invalid);
    }

    let unit_len = rest
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (unit, rest) = rest.split_at(unit_len);
    if unit.is_empty() {
        return Err(DurationError::MissingUnit);
    }
    let per_unit = unit_nanos(unit).ok_or(DurationError::UnknownUnit)?;

    let whole = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| DurationError::Overflow)?
    };
    let nanos = whole
        .checked_mul(per_unit)
        .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, per_unit)))
        .ok_or(DurationError::Overflow)?;
    Ok((nanos, rest))
}

fn split_digits(text: &str) -> (&str, &str) {
    let len = text.bytes().take_while(u8::is_ascii_digit).count();
    text.split_at(len)
}

/// Nanoseconds contributed by a fractional part, truncated.
fn fraction_nanos(digits: &str, per_unit: u128) -> u128 {
    let digits = &digits[..digits.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    let numerator = digits
        .bytes()
        .fold(0u128, |acc, digit| acc * 10 + u128::from(digit - b'0'));
    let scale = 10u128.pow(digits.len() as u32);
    numerator * per_unit / scale
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}
