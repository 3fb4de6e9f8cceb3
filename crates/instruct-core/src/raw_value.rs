//! Raw, loosely typed conversion input.

use std::any::{Any, type_name};
use std::fmt;

use crate::TypeHash;

/// A type-erased value from a structured payload.
///
/// Keeps the static type's identity and name next to the boxed value so the
/// resolver can report what it was offered without inspecting the content.
pub struct NativeValue {
    value: Box<dyn Any + Send + Sync>,
    type_hash: TypeHash,
    type_name: &'static str,
}

impl NativeValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_hash: TypeHash::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the value out as `T`, or get `self` back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, NativeValue> {
        let NativeValue { value, type_hash, type_name } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(NativeValue { value, type_hash, type_name }),
        }
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeValue({})", self.type_name)
    }
}

/// Externally supplied input to the resolver.
///
/// A native value holding a `String` or `Vec<String>` is always represented by
/// the dedicated variants; use [`RawValue::from_value`] to get that
/// normalization for arbitrary values.
#[derive(Debug)]
pub enum RawValue {
    /// A single scalar in textual form.
    String(String),
    /// An ordered sequence of scalars in textual form.
    Strings(Vec<String>),
    /// An already typed value.
    Native(NativeValue),
}

impl RawValue {
    /// Wrap an arbitrary value.
    pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
        NativeValue::new(value).into()
    }

    /// Shape of this value, for diagnostics.
    pub fn shape(&self) -> Shape {
        match self {
            RawValue::String(_) => Shape::String,
            RawValue::Strings(_) => Shape::Strings,
            RawValue::Native(native) => Shape::Native(native.type_name()),
        }
    }

    /// Identity of the carried type.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            RawValue::String(_) => TypeHash::of::<String>(),
            RawValue::Strings(_) => TypeHash::of::<Vec<String>>(),
            RawValue::Native(native) => native.type_hash(),
        }
    }

    /// The text of a single-string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            RawValue::Strings(values) => Some(values),
            _ => None,
        }
    }

    /// Erase the value into a [`NativeValue`].
    pub fn into_native(self) -> NativeValue {
        match self {
            RawValue::String(text) => NativeValue::new(text),
            RawValue::Strings(values) => NativeValue::new(values),
            RawValue::Native(native) => native,
        }
    }

    /// Take the value out as exactly `T`, or get it back unchanged.
    pub fn take<T: Any>(self) -> Result<T, RawValue> {
        self.into_native().downcast::<T>().map_err(RawValue::from)
    }
}

impl From<NativeValue> for RawValue {
    fn from(native: NativeValue) -> Self {
        let native = match native.downcast::<String>() {
            Ok(text) => return RawValue::String(text),
            Err(native) => native,
        };
        match native.downcast::<Vec<String>>() {
            Ok(values) => RawValue::Strings(values),
            Err(native) => RawValue::Native(native),
        }
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::String(text)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::String(text.to_owned())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        RawValue::Strings(values)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        RawValue::Strings(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<TextInput> for RawValue {
    fn from(input: TextInput) -> Self {
        match input {
            TextInput::Single(text) => RawValue::String(text),
            TextInput::Multiple(values) => RawValue::Strings(values),
        }
    }
}

/// String-only input, for callers that have not yet decided whether a field
/// takes one value or many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    Single(String),
    Multiple(Vec<String>),
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        TextInput::Single(text)
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        TextInput::Single(text.to_owned())
    }
}

impl From<Vec<String>> for TextInput {
    fn from(values: Vec<String>) -> Self {
        TextInput::Multiple(values)
    }
}

impl From<Vec<&str>> for TextInput {
    fn from(values: Vec<&str>) -> Self {
        TextInput::Multiple(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for TextInput {
    fn from(values: &[&str]) -> Self {
        TextInput::Multiple(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// The shape of a raw value: what kind of thing was offered, not its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    String,
    Strings,
    /// A typed value; carries the type name.
    Native(&'static str),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String => write!(f, "string"),
            Shape::Strings => write!(f, "string sequence"),
            Shape::Native(name) => write!(f, "value of type '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_strings_are_normalized() {
        assert!(matches!(RawValue::from_value(String::from("x")), RawValue::String(_)));
        assert!(matches!(
            RawValue::from_value(vec![String::from("x")]),
            RawValue::Strings(_)
        ));
        assert!(matches!(RawValue::from_value(5i32), RawValue::Native(_)));
    }

    #[test]
    fn take_exact_type() {
        let raw = RawValue::from_value(vec![1i32, 2, 3]);
        assert_eq!(raw.take::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn take_mismatch_returns_value() {
        let raw = RawValue::from_value(vec![1i32, 2, 3]);
        let raw = raw.take::<Vec<i64>>().unwrap_err();
        assert_eq!(raw.shape(), Shape::Native(type_name::<Vec<i32>>()));
        assert_eq!(raw.take::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn take_string_round_trips_variant() {
        let raw = RawValue::from("abc");
        let raw = raw.take::<bool>().unwrap_err();
        assert_eq!(raw.as_str(), Some("abc"));
        assert_eq!(raw.take::<String>().unwrap(), "abc");
    }

    #[test]
    fn type_hash_follows_carried_type() {
        assert_eq!(RawValue::from("a").type_hash(), TypeHash::of::<String>());
        assert_eq!(RawValue::from(vec!["a"]).type_hash(), TypeHash::of::<Vec<String>>());
        assert_eq!(RawValue::from_value(1u8).type_hash(), TypeHash::of::<u8>());
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::String.to_string(), "string");
        assert_eq!(Shape::Strings.to_string(), "string sequence");
        assert_eq!(Shape::Native("u8").to_string(), "value of type 'u8'");
    }

    #[test]
    fn native_debug_hides_content() {
        let native = NativeValue::new(String::from("secret"));
        let debug = format!("{native:?}");
        assert!(debug.starts_with("NativeValue("));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn text_input_conversions() {
        assert_eq!(TextInput::from("a"), TextInput::Single("a".into()));
        assert_eq!(
            TextInput::from(&["a", "b"][..]),
            TextInput::Multiple(vec!["a".into(), "b".into()])
        );
        assert!(RawValue::from(TextInput::from(vec!["a"])).as_strings().is_some());
    }
}
