//! Typed scalar values produced by primitive coercion.

use crate::Kind;

/// A parsed primitive value, tagged with its exact width.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl Scalar {
    /// The kind this scalar was produced for.
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Bool(_) => Kind::Bool,
            Scalar::Int8(_) => Kind::Int8,
            Scalar::Int16(_) => Kind::Int16,
            Scalar::Int32(_) => Kind::Int32,
            Scalar::Int64(_) => Kind::Int64,
            Scalar::Uint8(_) => Kind::Uint8,
            Scalar::Uint16(_) => Kind::Uint16,
            Scalar::Uint32(_) => Kind::Uint32,
            Scalar::Uint64(_) => Kind::Uint64,
            Scalar::Float32(_) => Kind::Float32,
            Scalar::Float64(_) => Kind::Float64,
            Scalar::String(_) => Kind::String,
        }
    }
}
