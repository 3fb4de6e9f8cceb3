//! Value resolution for request decoding.
//!
//! `instruct` converts loosely typed input (a string, a list of strings or an
//! already typed value) into a strongly typed destination. The destination's
//! type decides how: exact-type converters first, then capability
//! converters, then pointer and container handling, conversion between
//! same-shaped types and finally primitive parsing.
//!
//! # Example
//!
//! ```
//! use std::net::IpAddr;
//! use std::time::Duration;
//!
//! use instruct::Resolver;
//!
//! let resolver = Resolver::builder().with_defaults().build().unwrap();
//!
//! let mut timeout = Duration::ZERO;
//! resolver.resolve_value(&mut timeout, "1.5s").unwrap();
//! assert_eq!(timeout, Duration::from_millis(1500));
//!
//! let mut addr = IpAddr::from([0, 0, 0, 0]);
//! resolver.resolve_value(&mut addr, "10.0.0.1").unwrap();
//! assert_eq!(addr, IpAddr::from([10, 0, 0, 1]));
//! ```
//!
//! User types opt in through [`Resolvable`], usually via
//! [`impl_resolvable!`].

pub mod builtins;
mod error;
mod field;
mod registry;
mod resolver;

pub use error::{BuiltinError, DecodeError, DurationError};
pub use field::{FieldBinding, UsedValues, wants_multiple};
pub use registry::{CustomReflect, CustomReflectRegistry, CustomType, CustomTypeRegistry};
pub use resolver::{Resolver, ResolverBuilder};

pub use instruct_core::{
    BoxError, CoerceError, Destination, Kind, NativeValue, RawValue, RegistrationError,
    Resolvable, ResolveError, Scalar, Shape, TextDecoder, TextInput, TypeHash, TypeInfo,
    coerce_scalar, impl_resolvable,
};
