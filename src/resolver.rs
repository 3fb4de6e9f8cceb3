//! The value resolver: turns a raw value into a typed destination.
//!
//! # Precedence
//!
//! Stages run in a fixed order and the first one that applies decides the
//! outcome. Nothing is retried.
//!
//! 1. **Assign**: the raw value already has the destination's type.
//! 2. **Custom type**: an exact-type converter is registered.
//! 3. **Custom reflect**: a capability converter matches.
//! 4. **Pointer**: resolve the pointee in a detached slot, attach on success.
//! 5. **Sequence**: nothing but an exact container (stage 1) is accepted.
//! 6. **Convert**: the destination converts from the raw value's type.
//! 7. **Coerce**: primitive destination and single-string input.
//! 8. Otherwise the conversion is unsupported.
//!
//! [`Resolver::resolve`] skips stages 2 and 3.
//!
//! # Example
//!
//! ```
//! use instruct::Resolver;
//!
//! let resolver = Resolver::new();
//!
//! let mut limit: Option<u16> = None;
//! resolver.resolve_value(&mut limit, "25").unwrap();
//! assert_eq!(limit, Some(25));
//!
//! let mut flag = false;
//! assert!(resolver.resolve(&mut flag, "trick").is_err());
//! assert!(!flag);
//! ```

use tracing::{debug, trace};

use instruct_core::{
    Destination, Kind, RawValue, RegistrationError, ResolveError, TextInput, coerce_scalar,
};

use crate::builtins;
use crate::registry::{CustomReflect, CustomReflectRegistry, CustomType, CustomTypeRegistry};

/// Which stages a resolution consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stages {
    All,
    /// Skip both registries.
    Intrinsic,
}

/// Immutable resolver configuration.
///
/// Cheap to clone and safe to share between threads; every call only writes
/// to its own destination.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    custom_types: CustomTypeRegistry,
    custom_reflects: CustomReflectRegistry,
}

impl Resolver {
    /// A resolver with no registered converters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub fn custom_types(&self) -> &CustomTypeRegistry {
        &self.custom_types
    }

    pub fn custom_reflects(&self) -> &CustomReflectRegistry {
        &self.custom_reflects
    }

    /// Resolve any raw value into `dest`, consulting every stage.
    ///
    /// On error `dest` is left as it was.
    pub fn resolve_value(
        &self,
        dest: &mut dyn Destination,
        raw: impl Into<RawValue>,
    ) -> Result<(), ResolveError> {
        self.run(dest, raw.into(), Stages::All)
    }

    /// Resolve string input into `dest` without the registries.
    ///
    /// On error `dest` is left as it was.
    pub fn resolve(
        &self,
        dest: &mut dyn Destination,
        input: impl Into<TextInput>,
    ) -> Result<(), ResolveError> {
        self.run(dest, RawValue::from(input.into()), Stages::Intrinsic)
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn run(
        &self,
        dest: &mut dyn Destination,
        raw: RawValue,
        stages: Stages,
    ) -> Result<(), ResolveError> {
        let info = dest.type_info();
        let shape = raw.shape();

        let raw = match dest.assign(raw) {
            Ok(()) => {
                trace!(target_type = info.name, stage = "assign", "resolved");
                return Ok(());
            }
            Err(raw) => raw,
        };

        if stages == Stages::All {
            if let Some(entry) = self.custom_types.get(info.hash) {
                trace!(target_type = info.name, stage = "custom_type", "resolving");
                return entry.apply(dest, &raw);
            }
            if let Some(entry) = self.custom_reflects.find(&info) {
                trace!(target_type = info.name, stage = "custom_reflect", "resolving");
                return entry.apply(dest, &info, &raw);
            }
        }

        match info.kind {
            Kind::Pointer => {
                trace!(target_type = info.name, stage = "pointer", "resolving");
                let mut pending = Some(raw);
                let outcome = dest.resolve_pointee(&mut |slot| {
                    let raw = pending
                        .take()
                        .ok_or_else(|| ResolveError::unsupported(info.name, shape))?;
                    self.run(slot, raw, stages)
                });
                return outcome
                    .unwrap_or_else(|| Err(ResolveError::unsupported(info.name, shape)));
            }
            Kind::Sequence => {
                trace!(target_type = info.name, stage = "sequence", "unsupported");
                return Err(ResolveError::unsupported(info.name, shape));
            }
            _ => {}
        }

        let raw = match dest.assign_converted(raw) {
            Ok(()) => {
                trace!(target_type = info.name, stage = "convert", "resolved");
                return Ok(());
            }
            Err(raw) => raw,
        };

        if info.kind.is_primitive()
            && let Some(text) = raw.as_str()
        {
            let scalar = coerce_scalar(info.kind, text)
                .map_err(|cause| ResolveError::coerce(info.name, shape, cause))?;
            if dest.assign_scalar(scalar) {
                trace!(target_type = info.name, stage = "coerce", "resolved");
                return Ok(());
            }
        }

        trace!(target_type = info.name, %shape, "unsupported");
        Err(ResolveError::unsupported(info.name, shape))
    }
}

/// Collects converters for a [`Resolver`].
///
/// Entries are validated when [`build`](ResolverBuilder::build) runs.
#[derive(Debug, Default)]
pub struct ResolverBuilder {
    custom_types: Vec<CustomType>,
    custom_reflects: Vec<CustomReflect>,
}

impl ResolverBuilder {
    pub fn custom_type(mut self, entry: CustomType) -> Self {
        self.custom_types.push(entry);
        self
    }

    pub fn custom_types(mut self, entries: impl IntoIterator<Item = CustomType>) -> Self {
        self.custom_types.extend(entries);
        self
    }

    pub fn custom_reflect(mut self, entry: CustomReflect) -> Self {
        self.custom_reflects.push(entry);
        self
    }

    pub fn custom_reflects(mut self, entries: impl IntoIterator<Item = CustomReflect>) -> Self {
        self.custom_reflects.extend(entries);
        self
    }

    /// Install the RFC 3339 timestamp, duration and text decoder converters.
    pub fn with_defaults(self) -> Self {
        self.custom_type(builtins::timestamp(builtins::TimeLayout::Rfc3339))
            .custom_type(builtins::duration())
            .custom_reflect(builtins::text_decoder())
    }

    /// Build the resolver.
    ///
    /// Fails if two exact-type converters target the same type.
    pub fn build(self) -> Result<Resolver, RegistrationError> {
        let mut custom_types = CustomTypeRegistry::new();
        for entry in self.custom_types {
            custom_types.register(entry)?;
        }

        let mut custom_reflects = CustomReflectRegistry::new();
        for entry in self.custom_reflects {
            custom_reflects.register(entry);
        }

        debug!(
            custom_types = custom_types.len(),
            custom_reflects = custom_reflects.len(),
            "resolver built"
        );
        Ok(Resolver { custom_types, custom_reflects })
    }
}
