//! Core types for the instruct value resolver.
//!
//! This crate holds everything the resolver and its extensions share:
//!
//! - [`TypeHash`] and [`Kind`]: exact identity and shape of a destination type
//! - [`Resolvable`] and [`Destination`]: how types describe themselves and how
//!   the resolver writes into them
//! - [`RawValue`]: the loosely typed input
//! - [`coerce_scalar`]: text to primitive conversion
//! - the error types shared by all of the above

mod coerce;
mod error;
mod kind;
mod raw_value;
mod resolvable;
mod scalar;
mod type_hash;

pub use coerce::coerce_scalar;
pub use error::{BoxError, CoerceError, RegistrationError, ResolveError};
pub use kind::Kind;
pub use raw_value::{NativeValue, RawValue, Shape, TextInput};
pub use resolvable::{Destination, PointeeResolver, Resolvable, TextDecoder, TypeInfo};
pub use scalar::Scalar;
pub use type_hash::TypeHash;
