//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use typeweld::prelude::*;
//! ```

// Model types
pub use typeweld_model::{
    AliasDef, AttrBag, CaseConvention, ConstDef, ConstValue, EngineConfig, EnumDef, EnumVariant,
    Field, Primitive, ScalarKind, StructDef, TypeDefinition, TypeReference, VariantShape,
};

// Codec types
pub use typeweld_codec::{
    ByteSequenceCodec, CodecError, ScalarCodec, ScalarCodecRegistry, ScalarValue, TimestampCodec,
    TimestampProfile,
};

// Engine types
pub use typeweld_engine::{
    emit_unit, DanglingReference, EmissionUnit, EmitEvent, EmitterDriver, EngineError, FieldSpec,
    PayloadSpec,
};
