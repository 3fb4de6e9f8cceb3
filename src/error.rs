//! Errors raised above the core resolver.
//!
//! [`DecodeError`] is what a dispatch layer reports for a whole field or
//! operation. [`BuiltinError`] and [`DurationError`] come out of the built-in
//! converters and reach callers through [`ResolveError::Custom`].

use thiserror::Error;

use instruct_core::{RegistrationError, ResolveError};

/// Errors reported while decoding the fields of an operation.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field had no value in any source.
    #[error("field '{field}' (tag name '{tag}') with operation '{operation}' is required but was not set")]
    Required {
        field: String,
        tag: String,
        operation: String,
    },

    /// Some externally supplied values were never consumed.
    #[error("some values were not used on operation '{operation}'")]
    ValuesNotUsed { operation: String },

    /// Resolving a field's value failed.
    #[error("error resolving field '{field}'")]
    Field {
        field: String,
        #[source]
        source: ResolveError,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl DecodeError {
    /// The resolution failure behind a [`DecodeError::Field`].
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            DecodeError::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from the built-in converters.
#[derive(Debug, Error)]
pub enum BuiltinError {
    /// The converter only accepts a single string.
    #[error("value is not a single string")]
    NotText,

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Errors from parsing a duration literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration")]
    Invalid,

    #[error("missing unit in duration")]
    MissingUnit,

    #[error("unknown unit in duration")]
    UnknownUnit,

    #[error("duration out of range")]
    Overflow,

    /// `std::time::Duration` cannot hold a negative span.
    #[error("negative duration")]
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;
    use instruct_core::Shape;
    use std::error::Error as _;

    #[test]
    fn required_message() {
        let err = DecodeError::Required {
            field: "Limit".into(),
            tag: "limit".into(),
            operation: "query".into(),
        };
        assert_eq!(
            err.to_string(),
            "field 'Limit' (tag name 'limit') with operation 'query' is required but was not set"
        );
    }

    #[test]
    fn field_error_keeps_source() {
        let err = DecodeError::Field {
            field: "Limit".into(),
            source: ResolveError::unsupported("i32", Shape::String),
        };
        assert_eq!(err.to_string(), "error resolving field 'Limit'");
        assert!(err.source().is_some());
        assert!(err.resolve_error().is_some_and(ResolveError::is_unsupported));
    }

    #[test]
    fn registration_is_transparent() {
        let err = DecodeError::from(RegistrationError::DuplicateCustomType("Duration"));
        assert_eq!(err.to_string(), "duplicate custom type resolver for 'Duration'");
    }

    #[test]
    fn duration_error_passes_through_builtin() {
        let err = BuiltinError::from(DurationError::MissingUnit);
        assert_eq!(err.to_string(), "missing unit in duration");
    }
}
