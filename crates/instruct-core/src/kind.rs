//! Destination kinds.

use std::fmt;

/// The closed set of shapes a destination type can have.
///
/// Every [`Resolvable`](crate::Resolvable) type declares its kind statically;
/// the resolver switches on it instead of probing the value at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    /// Optional indirection (`Option<T>`).
    Pointer,
    /// Ordered container (`Vec<T>`).
    Sequence,
    Struct,
    Other,
}

impl Kind {
    /// Kind used for `isize`.
    pub const ISIZE: Kind = if cfg!(target_pointer_width = "32") { Kind::Int32 } else { Kind::Int64 };

    /// Kind used for `usize`.
    pub const USIZE: Kind = if cfg!(target_pointer_width = "32") { Kind::Uint32 } else { Kind::Uint64 };

    /// Whether primitive coercion from text applies to this kind.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Float32
                | Kind::Float64
                | Kind::String
        )
    }

    /// Get the name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Pointer => "pointer",
            Kind::Sequence => "sequence",
            Kind::Struct => "struct",
            Kind::Other => "other",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
