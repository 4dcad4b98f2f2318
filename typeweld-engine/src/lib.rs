//! # TypeWeld Engine
//!
//! Emission engine turning the type IR into an ordered event stream.
//!
//! This crate provides:
//! - Attribute resolution for field and variant names
//! - Target-platform filtering with dangling-reference propagation
//! - Dependency ordering with forward-declaration cycle cutting
//! - Enum lowering into the canonical tagged-union shape
//! - Constant literal rendering
//! - The emitter driver producing [`events::EmitEvent`] streams

pub mod driver;
pub mod error;
pub mod events;
pub mod filter;
pub mod literal;
pub mod order;
pub mod resolve;
pub mod tagging;

pub use driver::{emit_unit, EmissionUnit, EmitterDriver};
pub use error::EngineError;
pub use events::{
    EmitAlias, EmitConst, EmitEnumDiscriminants, EmitEnumVariant, EmitEvent, EmitStruct,
    EmitSyntheticContainer, FieldSpec, PayloadSpec,
};
pub use filter::DanglingReference;
pub use order::EdgeKind;
pub use resolve::{
    ResolvedAlias, ResolvedConst, ResolvedDef, ResolvedEnum, ResolvedField, ResolvedShape,
    ResolvedStruct, ResolvedVariant,
};
pub use tagging::{LoweredEnum, SyntheticPayload, TaggedVariant};
