//! Field-level helpers for a decoding layer.
//!
//! A decoding layer looks a field's value up in some source, then hands the
//! result here: [`Resolver::resolve_field`] enforces `required` and attaches
//! the field name to resolution failures, and [`UsedValues`] tracks which
//! source keys were consumed so leftover input can be rejected.

use rustc_hash::{FxHashMap, FxHashSet};

use instruct_core::{Destination, Kind, RawValue};

use crate::Resolver;
use crate::error::DecodeError;

/// How a struct field is bound to an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Source the value comes from, such as `query` or `header`.
    pub operation: String,
    /// Name of the destination field.
    pub field: String,
    /// Key the value is looked up by.
    pub tag: String,
    pub required: bool,
}

impl FieldBinding {
    pub fn new(
        operation: impl Into<String>,
        field: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        FieldBinding {
            operation: operation.into(),
            field: field.into(),
            tag: tag.into(),
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Whether a source should supply every value for `dest` rather than one.
pub fn wants_multiple(dest: &dyn Destination) -> bool {
    dest.type_info().kind == Kind::Sequence
}

impl Resolver {
    /// Resolve a value a source may or may not have found.
    ///
    /// Returns `Ok(false)` when nothing was found and the field is optional;
    /// `dest` is not touched in that case.
    pub fn resolve_field(
        &self,
        dest: &mut dyn Destination,
        binding: &FieldBinding,
        raw: Option<RawValue>,
    ) -> Result<bool, DecodeError> {
        let Some(raw) = raw else {
            if binding.required {
                return Err(DecodeError::Required {
                    field: binding.field.clone(),
                    tag: binding.tag.clone(),
                    operation: binding.operation.clone(),
                });
            }
            return Ok(false);
        };

        self.resolve_value(dest, raw).map_err(|source| DecodeError::Field {
            field: binding.field.clone(),
            source,
        })?;
        Ok(true)
    }
}

/// Source keys consumed while decoding, grouped by operation.
#[derive(Debug, Clone, Default)]
pub struct UsedValues {
    used: FxHashMap<String, FxHashSet<String>>,
}

impl UsedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, operation: &str, key: &str) {
        self.used
            .entry(operation.to_owned())
            .or_default()
            .insert(key.to_owned());
    }

    pub fn is_used(&self, operation: &str, key: &str) -> bool {
        self.used
            .get(operation)
            .is_some_and(|keys| keys.contains(key))
    }

    /// Keys consumed for `operation`, in no particular order.
    pub fn used(&self, operation: &str) -> impl Iterator<Item = &str> {
        self.used
            .get(operation)
            .into_iter()
            .flat_map(|keys| keys.iter().map(String::as_str))
    }

    /// Fail unless every key in `available` was consumed for `operation`.
    pub fn ensure_all_used<'a>(
        &self,
        operation: &str,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), DecodeError> {
        match available.into_iter().find(|key| !self.is_used(operation, key)) {
            None => Ok(()),
            Some(_) => Err(DecodeError::ValuesNotUsed { operation: operation.to_owned() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(field: &str) -> FieldBinding {
        FieldBinding::new("query", field, field.to_lowercase())
    }

    #[test]
    fn missing_optional_field() {
        let mut dest = 7i32;
        let found = Resolver::new().resolve_field(&mut dest, &query("Limit"), None).unwrap();
        assert!(!found);
        assert_eq!(dest, 7);
    }

    #[test]
    fn missing_required_field() {
        let mut dest = 0i32;
        let binding = query("Limit").required(true);
        let err = Resolver::new().resolve_field(&mut dest, &binding, None).unwrap_err();
        assert!(matches!(err, DecodeError::Required { ref tag, .. } if tag == "limit"));
    }

    #[test]
    fn found_field_is_resolved() {
        let mut dest = 0i32;
        let found = Resolver::new()
            .resolve_field(&mut dest, &query("Limit"), Some("25".into()))
            .unwrap();
        assert!(found);
        assert_eq!(dest, 25);
    }

    #[test]
    fn resolution_failure_names_field() {
        let mut dest = 0i32;
        let err = Resolver::new()
            .resolve_field(&mut dest, &query("Limit"), Some("many".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "error resolving field 'Limit'");
        assert!(err.resolve_error().is_some_and(|e| e.is_unsupported()));
        assert_eq!(dest, 0);
    }

    #[test]
    fn multiple_follows_sequence_kind() {
        assert!(wants_multiple(&Vec::<String>::new()));
        assert!(!wants_multiple(&String::new()));
        assert!(!wants_multiple(&None::<Vec<String>>));
    }

    #[test]
    fn used_values_by_operation() {
        let mut used = UsedValues::new();
        used.mark("query", "limit");
        used.mark("header", "x-id");
        assert!(used.is_used("query", "limit"));
        assert!(!used.is_used("query", "x-id"));
        assert_eq!(used.used("header").collect::<Vec<_>>(), vec!["x-id"]);
        assert_eq!(used.used("body").count(), 0);
    }

    #[test]
    fn ensure_all_used() {
        let mut used = UsedValues::new();
        used.mark("query", "limit");
        assert!(used.ensure_all_used("query", ["limit"]).is_ok());

        let err = used.ensure_all_used("query", ["limit", "offset"]).unwrap_err();
        assert_eq!(err.to_string(), "some values were not used on operation 'query'");
    }
}
