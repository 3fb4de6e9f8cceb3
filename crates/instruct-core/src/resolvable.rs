//! The `Resolvable` trait: how a destination type describes itself.
//!
//! The resolver never inspects values at runtime. Instead every destination
//! type implements [`Resolvable`], which supplies its identity, its [`Kind`]
//! and the hooks each precedence stage needs. The resolver itself works on
//! `&mut dyn Destination`, an object-safe view implemented for every
//! `Resolvable` type.
//!
//! # Example
//!
//! ```
//! use instruct_core::{Kind, RawValue, Resolvable};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Resolvable for Point {
//!     const KIND: Kind = Kind::Struct;
//! }
//!
//! let raw = RawValue::from_value(Point { x: 1, y: 2 });
//! assert_eq!(Point::accept(raw).unwrap(), Point { x: 1, y: 2 });
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::str::FromStr;

use crate::{BoxError, Kind, NativeValue, RawValue, ResolveError, Scalar, TypeHash};

/// Callback used to resolve into a detached pointee slot.
pub type PointeeResolver<'a> = dyn FnMut(&mut dyn Destination) -> Result<(), ResolveError> + 'a;

// ============================================================================
// Type descriptors
// ============================================================================

/// Static description of a destination type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub hash: TypeHash,
    pub name: &'static str,
    pub kind: Kind,
    /// Set when the type can decode itself from text.
    pub text_decoder: Option<TextDecoder>,
}

impl TypeInfo {
    pub fn of<T: Resolvable>() -> Self {
        TypeInfo {
            hash: T::type_hash(),
            name: T::type_name(),
            kind: T::KIND,
            text_decoder: T::text_decoder(),
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.hash == TypeHash::of::<T>()
    }
}

/// The "decode self from text" capability of a type.
#[derive(Clone, Copy)]
pub struct TextDecoder(fn(&str) -> Result<NativeValue, BoxError>);

impl TextDecoder {
    /// Decoder backed by the type's `FromStr` implementation.
    pub fn of<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        T::Err: Into<BoxError>,
    {
        TextDecoder(decode_text::<T>)
    }

    pub fn decode(&self, text: &str) -> Result<NativeValue, BoxError> {
        (self.0)(text)
    }
}

fn decode_text<T>(text: &str) -> Result<NativeValue, BoxError>
where
    T: FromStr + Any + Send + Sync,
    T::Err: Into<BoxError>,
{
    text.parse::<T>().map(NativeValue::new).map_err(Into::into)
}

impl fmt::Debug for TextDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TextDecoder(..)")
    }
}

// ============================================================================
// Resolvable
// ============================================================================

/// A type the resolver can write into.
///
/// Only [`KIND`](Resolvable::KIND) is required. The remaining hooks default to
/// "not supported", so a plain struct only accepts values of its own type.
pub trait Resolvable: Any + Send + Sync + Sized {
    /// The kind the resolver switches on.
    const KIND: Kind;

    fn type_hash() -> TypeHash {
        TypeHash::of::<Self>()
    }

    fn type_name() -> &'static str {
        type_name::<Self>()
    }

    /// Text decoding capability, consulted by capability resolvers.
    fn text_decoder() -> Option<TextDecoder> {
        None
    }

    /// Direct assignment: succeeds only for a raw value of exactly this type.
    fn accept(raw: RawValue) -> Result<Self, RawValue> {
        raw.take::<Self>()
    }

    /// Conversion from a type with an identical underlying representation.
    fn convert(raw: RawValue) -> Result<Self, RawValue> {
        Err(raw)
    }

    /// Build a value from a coerced primitive of this type's kind.
    fn from_scalar(_scalar: Scalar) -> Option<Self> {
        None
    }

    /// Resolve through an indirection. Only pointer kinds return `Some`.
    ///
    /// The pointee is resolved in a detached slot; the returned value exists
    /// only if that resolution succeeded.
    fn via_pointee(_resolve: &mut PointeeResolver<'_>) -> Option<Result<Self, ResolveError>> {
        None
    }
}

// ============================================================================
// Destination
// ============================================================================

/// Object-safe view of a storage location the resolver writes through.
///
/// Every method either writes a complete value of the destination's own type
/// and reports success, or leaves the destination untouched.
pub trait Destination {
    fn type_info(&self) -> TypeInfo;

    /// Stage 1: direct assignment.
    fn assign(&mut self, raw: RawValue) -> Result<(), RawValue>;

    /// Stage 6: same-representation conversion.
    fn assign_converted(&mut self, raw: RawValue) -> Result<(), RawValue>;

    /// Stage 7: store a coerced primitive. Returns `false` if not applicable.
    fn assign_scalar(&mut self, scalar: Scalar) -> bool;

    /// Stage 4: pointer indirection. `None` for non-pointer destinations.
    fn resolve_pointee(&mut self, resolve: &mut PointeeResolver<'_>) -> Option<Result<(), ResolveError>>;
}

impl<T: Resolvable> Destination for T {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn assign(&mut self, raw: RawValue) -> Result<(), RawValue> {
        *self = T::accept(raw)?;
        Ok(())
    }

    fn assign_converted(&mut self, raw: RawValue) -> Result<(), RawValue> {
        *self = T::convert(raw)?;
        Ok(())
    }

    fn assign_scalar(&mut self, scalar: Scalar) -> bool {
        match T::from_scalar(scalar) {
            Some(value) => {
                *self = value;
                true
            }
            None => false,
        }
    }

    fn resolve_pointee(&mut self, resolve: &mut PointeeResolver<'_>) -> Option<Result<(), ResolveError>> {
        let resolved = T::via_pointee(resolve)?;
        Some(resolved.map(|value| *self = value))
    }
}

/// A detached, initially empty slot for a pointee of type `T`.
///
/// Used instead of `T::default()` so pointee types need no zero value.
struct Pointee<T> {
    value: Option<T>,
}

impl<T: Resolvable> Pointee<T> {
    fn empty() -> Self {
        Pointee { value: None }
    }

    fn store(&mut self, value: T) {
        self.value = Some(value);
    }

    fn into_inner(self) -> Result<T, ResolveError> {
        // Success without a stored value means a Destination impl misbehaved.
        self.value.ok_or_else(|| ResolveError::custom("pointee resolution stored no value"))
    }
}

impl<T: Resolvable> Destination for Pointee<T> {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn assign(&mut self, raw: RawValue) -> Result<(), RawValue> {
        self.store(T::accept(raw)?);
        Ok(())
    }

    fn assign_converted(&mut self, raw: RawValue) -> Result<(), RawValue> {
        self.store(T::convert(raw)?);
        Ok(())
    }

    fn assign_scalar(&mut self, scalar: Scalar) -> bool {
        match T::from_scalar(scalar) {
            Some(value) => {
                self.store(value);
                true
            }
            None => false,
        }
    }

    fn resolve_pointee(&mut self, resolve: &mut PointeeResolver<'_>) -> Option<Result<(), ResolveError>> {
        let resolved = T::via_pointee(resolve)?;
        Some(resolved.map(|value| self.store(value)))
    }
}

// ============================================================================
// Primitive implementations
// ============================================================================

macro_rules! impl_resolvable_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Resolvable for $ty {
                const KIND: Kind = Kind::$kind;

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$kind(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_resolvable_primitive!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    String => String,
);

impl Resolvable for isize {
    const KIND: Kind = Kind::ISIZE;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Int32(value) => isize::try_from(value).ok(),
            Scalar::Int64(value) => isize::try_from(value).ok(),
            _ => None,
        }
    }
}

impl Resolvable for usize {
    const KIND: Kind = Kind::USIZE;

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Uint32(value) => usize::try_from(value).ok(),
            Scalar::Uint64(value) => usize::try_from(value).ok(),
            _ => None,
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

impl<T: Resolvable> Resolvable for Option<T> {
    const KIND: Kind = Kind::Pointer;

    fn via_pointee(resolve: &mut PointeeResolver<'_>) -> Option<Result<Self, ResolveError>> {
        let mut slot = Pointee::<T>::empty();
        let outcome = {
            let dest: &mut dyn Destination = &mut slot;
            resolve(dest)
        };
        Some(outcome.and_then(|()| slot.into_inner()).map(Some))
    }
}

impl<T: Any + Send + Sync> Resolvable for Vec<T> {
    const KIND: Kind = Kind::Sequence;
}

/// A type-erased destination accepts any raw value as-is.
impl Resolvable for NativeValue {
    const KIND: Kind = Kind::Other;

    fn accept(raw: RawValue) -> Result<Self, RawValue> {
        Ok(raw.into_native())
    }
}

// ============================================================================
// Standard library and chrono types
// ============================================================================

impl Resolvable for std::time::Duration {
    const KIND: Kind = Kind::Struct;
}

macro_rules! impl_resolvable_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Resolvable for $ty {
                const KIND: Kind = Kind::Struct;

                fn text_decoder() -> Option<TextDecoder> {
                    Some(TextDecoder::of::<$ty>())
                }
            }
        )*
    };
}

impl_resolvable_text!(
    std::net::IpAddr,
    std::net::Ipv4Addr,
    std::net::Ipv6Addr,
    std::net::SocketAddr,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
);

// ============================================================================
// User type helper
// ============================================================================

/// Implement [`Resolvable`] for user types.
///
/// ```
/// use instruct_core::{impl_resolvable, Kind, Resolvable, Scalar};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Config { retries: u32 }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Overrides { retries: u32 }
///
/// impl From<Config> for Overrides {
///     fn from(c: Config) -> Self { Overrides { retries: c.retries } }
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Username(String);
///
/// #[derive(Debug, PartialEq)]
/// struct Color(u8, u8, u8);
///
/// impl std::str::FromStr for Color {
///     type Err = std::num::ParseIntError;
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         let v = u32::from_str_radix(s.trim_start_matches('#'), 16)?;
///         Ok(Color((v >> 16) as u8, (v >> 8) as u8, v as u8))
///     }
/// }
///
/// impl_resolvable!(struct Config);
/// impl_resolvable!(struct Overrides, from Config);
/// impl_resolvable!(newtype Username(String));
/// impl_resolvable!(text Color);
///
/// assert_eq!(<Username as Resolvable>::KIND, Kind::String);
/// assert_eq!(Username::from_scalar(Scalar::String("ann".into())), Some(Username("ann".into())));
/// assert!(Color::text_decoder().is_some());
/// ```
#[macro_export]
macro_rules! impl_resolvable {
    // A struct that only accepts its own type.
    (struct $ty:ty) => {
        impl $crate::Resolvable for $ty {
            const KIND: $crate::Kind = $crate::Kind::Struct;
        }
    };

    // A struct convertible from other types with the same representation.
    (struct $ty:ty, from $($src:ty),+) => {
        impl $crate::Resolvable for $ty {
            const KIND: $crate::Kind = $crate::Kind::Struct;

            fn convert(raw: $crate::RawValue) -> ::core::result::Result<Self, $crate::RawValue> {
                $(
                    let raw = match raw.take::<$src>() {
                        ::core::result::Result::Ok(value) => return ::core::result::Result::Ok(<$ty>::from(value)),
                        ::core::result::Result::Err(raw) => raw,
                    };
                )+
                ::core::result::Result::Err(raw)
            }
        }
    };

    // A single-field tuple struct sharing the kind of its inner type.
    (newtype $ty:ident($inner:ty)) => {
        impl $crate::Resolvable for $ty {
            const KIND: $crate::Kind = <$inner as $crate::Resolvable>::KIND;

            fn convert(raw: $crate::RawValue) -> ::core::result::Result<Self, $crate::RawValue> {
                raw.take::<$inner>().map($ty)
            }

            fn from_scalar(scalar: $crate::Scalar) -> ::core::option::Option<Self> {
                <$inner as $crate::Resolvable>::from_scalar(scalar).map($ty)
            }
        }
    };

    // A type that decodes itself from text through `FromStr`.
    (text $ty:ty) => {
        impl $crate::Resolvable for $ty {
            const KIND: $crate::Kind = $crate::Kind::Struct;

            fn text_decoder() -> ::core::option::Option<$crate::TextDecoder> {
                ::core::option::Option::Some($crate::TextDecoder::of::<$ty>())
            }
        }
    };
}
