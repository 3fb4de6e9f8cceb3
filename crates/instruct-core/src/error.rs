//! Error types for value resolution.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ResolveError
//! ├── Unsupported      - no precedence stage produced a value
//! │   └── CoerceError  - (source) primitive text parse failure
//! └── Custom           - error returned by a registered converter, unchanged
//! RegistrationError    - invalid resolver configuration
//! ```
//!
//! Messages name types and value shapes, never the raw input itself.

use thiserror::Error;

use crate::{Kind, Shape};

/// Boxed error returned by user-supplied converters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Coercion Errors
// ============================================================================

/// Errors from converting text into a primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// The text is not a valid literal for the kind.
    #[error("invalid {kind} syntax")]
    InvalidSyntax { kind: Kind },

    /// The literal is well formed but does not fit in the kind's bit width.
    #[error("value out of range for {kind}")]
    OutOfRange { kind: Kind },

    /// The kind has no textual form.
    #[error("{0} is not a primitive kind")]
    NotPrimitive(Kind),
}

// ============================================================================
// Resolution Errors
// ============================================================================

/// Errors produced by the value resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No stage could turn the raw value into the destination type.
    ///
    /// Primitive parse failures are reported through this variant too, with the
    /// parse error as `cause`, so callers only need to match one family.
    #[error("cannot resolve {shape} into '{target}'{}", describe_cause(.cause))]
    Unsupported {
        /// Destination type name.
        target: &'static str,
        /// Shape of the raw value that was offered.
        shape: Shape,
        /// Underlying primitive parse failure, if any.
        #[source]
        cause: Option<CoerceError>,
    },

    /// A registered converter failed; its error is passed through verbatim.
    #[error(transparent)]
    Custom(BoxError),
}

fn describe_cause(cause: &Option<CoerceError>) -> String {
    match cause {
        Some(cause) => format!(": {cause}"),
        None => String::new(),
    }
}

impl ResolveError {
    pub fn unsupported(target: &'static str, shape: Shape) -> Self {
        ResolveError::Unsupported { target, shape, cause: None }
    }

    pub fn coerce(target: &'static str, shape: Shape, cause: CoerceError) -> Self {
        ResolveError::Unsupported { target, shape, cause: Some(cause) }
    }

    pub fn custom(error: impl Into<BoxError>) -> Self {
        ResolveError::Custom(error.into())
    }

    /// Whether this error belongs to the unsupported-conversion family.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ResolveError::Unsupported { .. })
    }

    /// The primitive parse failure behind this error, if any.
    pub fn coerce_error(&self) -> Option<CoerceError> {
        match self {
            ResolveError::Unsupported { cause, .. } => *cause,
            ResolveError::Custom(_) => None,
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while assembling a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two exact-type converters were registered for the same type.
    #[error("duplicate custom type resolver for '{0}'")]
    DuplicateCustomType(&'static str),
}
