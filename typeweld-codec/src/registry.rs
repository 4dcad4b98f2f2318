//! Scalar codec contract and registry.
//!
//! The registry is a plain value constructed at startup and threaded
//! through the engine entry point. It is read-only afterwards and
//! `Send + Sync`, so independent compilation units can share one registry
//! across worker threads without locking.

use crate::bytes::ByteSequenceCodec;
use crate::error::CodecError;
use crate::timestamp::TimestampCodec;
use crate::{bytes, timestamp};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use typeweld_model::ScalarKind;

/// Decoded semantic value produced by a scalar codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    /// Decoded byte sequence.
    Bytes(Vec<u8>),
    /// Decoded UTC timestamp.
    Timestamp(DateTime<Utc>),
}

impl ScalarValue {
    /// Returns the kind of the decoded value.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Bytes(_) => ScalarKind::Bytes,
            Self::Timestamp(_) => ScalarKind::Timestamp,
        }
    }

    /// Returns the canonical wire form of the decoded value.
    #[must_use]
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Bytes(b) => bytes::encode(b),
            Self::Timestamp(ts) => timestamp::encode(ts),
        }
    }
}

/// Decode/encode contract for one scalar kind.
///
/// Decode is total with explicit failure modes; encode always succeeds and
/// produces the canonical wire form.
pub trait ScalarCodec: Send + Sync {
    /// Semantic kind served by this codec.
    fn kind(&self) -> ScalarKind;

    /// Decodes a wire value. `field` names the owning field for error
    /// reporting.
    fn decode(&self, field: &str, value: &Value) -> Result<ScalarValue, CodecError>;

    /// Encodes a decoded value back to its canonical wire form.
    fn encode(&self, value: &ScalarValue) -> Value {
        value.to_wire()
    }
}

/// Codec lookup by semantic scalar kind.
pub struct ScalarCodecRegistry {
    codecs: IndexMap<ScalarKind, Box<dyn ScalarCodec>>,
}

impl ScalarCodecRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codecs: IndexMap::new(),
        }
    }

    /// Creates a registry with the built-in codecs: byte sequences and
    /// lenient timestamps.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ByteSequenceCodec));
        registry.register(Box::new(TimestampCodec::lenient()));
        registry
    }

    /// Registers a codec, replacing any existing codec of the same kind.
    pub fn register(&mut self, codec: Box<dyn ScalarCodec>) {
        self.codecs.insert(codec.kind(), codec);
    }

    /// Looks up the codec for a kind.
    #[must_use]
    pub fn get(&self, kind: ScalarKind) -> Option<&dyn ScalarCodec> {
        self.codecs.get(&kind).map(Box::as_ref)
    }

    /// Returns true if a codec is registered for the kind.
    #[must_use]
    pub fn contains(&self, kind: ScalarKind) -> bool {
        self.codecs.contains_key(&kind)
    }

    /// Returns the registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = ScalarKind> + '_ {
        self.codecs.keys().copied()
    }
}

impl Default for ScalarCodecRegistry {
    /// The default registry carries the built-in codecs.
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ScalarCodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarCodecRegistry")
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}
