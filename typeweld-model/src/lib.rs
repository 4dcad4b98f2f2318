//! # TypeWeld Model
//!
//! Type-definition IR consumed by the emission engine.
//!
//! This crate provides:
//! - Definition and type-expression model
//! - Recognized attribute bag
//! - Case conventions and identifier conversion
//! - Engine configuration

pub mod attrs;
pub mod config;
pub mod defs;
pub mod rename;
pub mod types;

pub use attrs::AttrBag;
pub use config::EngineConfig;
pub use defs::{
    AliasDef, ConstDef, ConstValue, EnumDef, EnumVariant, Field, StructDef, TypeDefinition,
    VariantShape,
};
pub use rename::CaseConvention;
pub use types::{Primitive, ScalarKind, TypeReference};
