//! Exact type identity for destinations and raw values.
//!
//! [`TypeHash`] wraps a Rust type's `TypeId`, so equality is type identity
//! and never a hash comparison. Two values share an identity only if they
//! have the very same static type: a newtype over `String` and `String`
//! itself differ, which is what the exact-type registry relies on.
//!
//! The only way to obtain one is [`TypeHash::of`].
//!
//! # Examples
//!
//! ```
//! use instruct_core::TypeHash;
//!
//! struct Meters(f64);
//!
//! assert_eq!(TypeHash::of::<f64>(), TypeHash::of::<f64>());
//! assert_ne!(TypeHash::of::<f64>(), TypeHash::of::<Meters>());
//! ```

use std::any::TypeId;

/// Identity of exactly one Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(TypeId);

impl TypeHash {
    /// Identity of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeHash(TypeId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_hash_determinism() {
        assert_eq!(TypeHash::of::<i32>(), TypeHash::of::<i32>());
        assert_eq!(TypeHash::of::<Vec<String>>(), TypeHash::of::<Vec<String>>());
    }

    #[test]
    fn type_hash_uniqueness() {
        let int_hash = TypeHash::of::<i32>();
        let long_hash = TypeHash::of::<i64>();
        let string_hash = TypeHash::of::<String>();
        let list_hash = TypeHash::of::<Vec<i32>>();

        assert_ne!(int_hash, long_hash);
        assert_ne!(int_hash, string_hash);
        assert_ne!(int_hash, list_hash);
        assert_ne!(long_hash, string_hash);
    }

    #[test]
    fn newtype_has_distinct_identity() {
        #[allow(dead_code)]
        struct Name(String);

        assert_ne!(TypeHash::of::<Name>(), TypeHash::of::<String>());
    }

    #[test]
    fn identity_is_the_type_id() {
        assert_eq!(TypeHash::of::<u8>().0, TypeId::of::<u8>());
        assert_ne!(TypeHash::of::<&'static str>().0, TypeId::of::<str>());
    }
}
