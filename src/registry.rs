//! Converter registries consulted before the intrinsic resolution stages.
//!
//! # Storage Model
//!
//! - **Exact types**: [`CustomType`] entries keyed by the destination's
//!   [`TypeHash`]. A lookup only matches the identical type; a newtype over a
//!   registered type is a different type.
//! - **Capabilities**: [`CustomReflect`] entries kept in registration order.
//!   Each carries a predicate over [`TypeInfo`]; the first match wins.
//!
//! Both registries are filled by [`ResolverBuilder`](crate::ResolverBuilder)
//! and are read-only afterwards. Entries hold their functions in `Arc`, so
//! cloning a registry is cheap.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use instruct_core::{
    BoxError, Destination, NativeValue, RawValue, RegistrationError, Resolvable, ResolveError,
    Shape, TypeHash, TypeInfo,
};

type ConvertFn = dyn Fn(&RawValue) -> Result<NativeValue, BoxError> + Send + Sync;
type MatchFn = dyn Fn(&TypeInfo) -> bool + Send + Sync;
type ReflectFn = dyn Fn(&TypeInfo, &RawValue) -> Result<NativeValue, BoxError> + Send + Sync;

// ============================================================================
// Exact-type entries
// ============================================================================

/// A converter that owns one exact destination type.
#[derive(Clone)]
pub struct CustomType {
    hash: TypeHash,
    name: &'static str,
    convert: Arc<ConvertFn>,
}

impl CustomType {
    /// Register `convert` as the only way to produce a `T` from a raw value
    /// that is not already a `T`.
    pub fn new<T, E, F>(convert: F) -> Self
    where
        T: Resolvable,
        E: Into<BoxError>,
        F: Fn(&RawValue) -> Result<T, E> + Send + Sync + 'static,
    {
        CustomType {
            hash: T::type_hash(),
            name: T::type_name(),
            convert: Arc::new(move |raw: &RawValue| {
                convert(raw).map(NativeValue::new).map_err(Into::into)
            }),
        }
    }

    pub fn type_hash(&self) -> TypeHash {
        self.hash
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Run the converter and store its result in `dest`.
    ///
    /// The converter's error is returned unchanged as [`ResolveError::Custom`].
    pub(crate) fn apply(
        &self,
        dest: &mut dyn Destination,
        raw: &RawValue,
    ) -> Result<(), ResolveError> {
        let value = (self.convert)(raw).map_err(ResolveError::Custom)?;
        store(dest, value)
    }
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("hash", &self.hash)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Exact-type converters keyed by destination type.
#[derive(Debug, Clone, Default)]
pub struct CustomTypeRegistry {
    entries: FxHashMap<TypeHash, CustomType>,
}

impl CustomTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. A second entry for the same type is rejected.
    pub fn register(&mut self, entry: CustomType) -> Result<(), RegistrationError> {
        if self.contains(entry.hash) {
            return Err(RegistrationError::DuplicateCustomType(entry.name));
        }
        self.entries.insert(entry.hash, entry);
        Ok(())
    }

    pub fn get(&self, hash: TypeHash) -> Option<&CustomType> {
        self.entries.get(&hash)
    }

    pub fn contains(&self, hash: TypeHash) -> bool {
        self.entries.contains_key(&hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Capability entries
// ============================================================================

/// A converter selected by a predicate over the destination's type info.
#[derive(Clone)]
pub struct CustomReflect {
    matches: Arc<MatchFn>,
    convert: Arc<ReflectFn>,
}

impl CustomReflect {
    /// `convert` must return a value of the destination's own type.
    pub fn new<P, F, E>(matches: P, convert: F) -> Self
    where
        P: Fn(&TypeInfo) -> bool + Send + Sync + 'static,
        F: Fn(&TypeInfo, &RawValue) -> Result<NativeValue, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        CustomReflect {
            matches: Arc::new(matches),
            convert: Arc::new(move |info: &TypeInfo, raw: &RawValue| {
                convert(info, raw).map_err(Into::into)
            }),
        }
    }

    pub fn matches(&self, info: &TypeInfo) -> bool {
        (self.matches)(info)
    }

    pub(crate) fn apply(
        &self,
        dest: &mut dyn Destination,
        info: &TypeInfo,
        raw: &RawValue,
    ) -> Result<(), ResolveError> {
        let value = (self.convert)(info, raw).map_err(ResolveError::Custom)?;
        store(dest, value)
    }
}

impl fmt::Debug for CustomReflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomReflect").finish_non_exhaustive()
    }
}

/// Capability converters in registration order.
#[derive(Debug, Clone, Default)]
pub struct CustomReflectRegistry {
    entries: Vec<CustomReflect>,
}

impl CustomReflectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CustomReflect) {
        self.entries.push(entry);
    }

    /// First entry whose predicate accepts `info`.
    pub fn find(&self, info: &TypeInfo) -> Option<&CustomReflect> {
        self.entries.iter().find(|entry| entry.matches(info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write a converter's output into `dest`.
fn store(dest: &mut dyn Destination, value: NativeValue) -> Result<(), ResolveError> {
    let target = dest.type_info().name;
    let produced = Shape::Native(value.type_name());
    dest.assign(value.into())
        .map_err(|_| ResolveError::unsupported(target, produced))
}
