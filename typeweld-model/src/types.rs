//! Type expressions and primitive scalars.
//!
//! A [`TypeReference`] is the type expression attached to fields, variant
//! payloads and aliases. References to named definitions form the dependency
//! graph the engine orders before emission.

use serde::{Deserialize, Serialize};

/// Primitive scalar kinds.
///
/// All kinds except [`Primitive::Bytes`] and [`Primitive::Timestamp`] have a
/// native JSON representation; those two are bound to a scalar codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// UTF-8 string.
    Str,
    /// Byte sequence; wire form is an array of 0-255 integers.
    Bytes,
    /// UTC timestamp; wire form is a fixed-pattern string.
    Timestamp,
}

impl Primitive {
    /// Returns the canonical name of the scalar.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
            Self::Bytes => "bytes",
            Self::Timestamp => "timestamp",
        }
    }

    /// Parses a scalar from its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "u64" => Some(Self::U64),
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            "string" => Some(Self::Str),
            "bytes" => Some(Self::Bytes),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Returns the JSON shape this scalar takes on the wire.
    #[must_use]
    pub const fn wire_shape(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::I8
            | Self::I16
            | Self::I32
            | Self::I64
            | Self::U8
            | Self::U16
            | Self::U32
            | Self::U64 => "integer",
            Self::F32 | Self::F64 => "number",
            Self::Str => "string",
            Self::Bytes => "array of integers in 0-255",
            Self::Timestamp => "UTC timestamp string",
        }
    }

    /// Returns the semantic codec kind, if this scalar needs one.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Bytes => Some(ScalarKind::Bytes),
            Self::Timestamp => Some(ScalarKind::Timestamp),
            _ => None,
        }
    }

    /// Returns true if this scalar has no native JSON representation.
    #[must_use]
    pub const fn is_codec_bound(&self) -> bool {
        matches!(self, Self::Bytes | Self::Timestamp)
    }
}

/// Semantic scalar kinds served by the codec registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// Byte sequences.
    Bytes,
    /// UTC timestamps.
    Timestamp,
}

impl ScalarKind {
    /// Returns the kind's canonical name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Timestamp => "timestamp",
        }
    }
}

/// Type expression.
///
/// `Named` references point at definitions within the same compilation unit;
/// `External` references are qualified names resolved by the target writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeReference {
    /// Primitive scalar.
    Primitive(Primitive),
    /// Named reference to another definition in the unit.
    Named(String),
    /// Value that may be absent or null on the wire.
    Optional(Box<TypeReference>),
    /// Ordered sequence of elements.
    Sequence(Box<TypeReference>),
    /// Key-value mapping.
    Mapping(Box<TypeReference>, Box<TypeReference>),
    /// Qualified reference to a type defined outside the unit.
    External {
        /// Module or package qualifier.
        qualifier: String,
        /// Type name within the qualifier.
        name: String,
    },
}

impl TypeReference {
    /// Creates a named reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a type as optional.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Wraps a type as a sequence element.
    #[must_use]
    pub fn sequence(inner: Self) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Creates a key-value mapping type.
    #[must_use]
    pub fn mapping(key: Self, value: Self) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }

    /// Creates a qualified external reference.
    #[must_use]
    pub fn external(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::External {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }

    /// Returns true if the top level of the expression is `Optional`.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the first codec-bound scalar kind in the expression,
    /// depth-first, or `None` if every scalar is JSON-native.
    #[must_use]
    pub fn codec_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Primitive(p) => p.scalar_kind(),
            Self::Named(_) | Self::External { .. } => None,
            Self::Optional(inner) | Self::Sequence(inner) => inner.codec_kind(),
            Self::Mapping(key, value) => key.codec_kind().or_else(|| value.codec_kind()),
        }
    }
}
