//! # TypeWeld
//!
//! Cross-language type definition emission engine.
//!
//! TypeWeld takes an intermediate representation of algebraic data types
//! and turns it into an ordered stream of declaration events a target
//! writer renders into source text for any language.
//!
//! ## Features
//!
//! - **Attribute resolution** - explicit renames, case conventions and
//!   keyword escaping resolved into final names
//! - **Target filtering** - platform-tagged definitions, fields and
//!   variants pruned per platform, with dangling references propagated
//! - **Dependency ordering** - declarations emitted definition-before-use,
//!   cutting cycles at forward-declarable edges
//! - **Enum tagging** - every enum lowered into a discriminant carrier,
//!   per-variant declarations and synthesized payload containers
//! - **Scalar codecs** - byte sequences and UTC timestamps bridged onto
//!   their portable wire forms
//!
//! ## Quick Start
//!
//! ```ignore
//! use typeweld::prelude::*;
//!
//! let mut user = StructDef::new("User");
//! user.add_field(Field::new("name", TypeReference::Primitive(Primitive::Str)));
//!
//! let config = EngineConfig::default();
//! let registry = ScalarCodecRegistry::default();
//! let unit = emit_unit(&[TypeDefinition::Struct(user)], &config, &registry)?;
//! for event in &unit.events {
//!     println!("{}", event.name());
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Type IR, attribute bags, case conventions, configuration
//! - [`codec`] - Scalar codecs and the codec registry
//! - [`engine`] - Resolution, filtering, ordering, tagging and the driver

pub mod prelude;

/// Type IR, attributes, case conventions and configuration.
pub mod model {
    pub use typeweld_model::*;
}

/// Scalar codecs and the codec registry.
pub mod codec {
    pub use typeweld_codec::*;
}

/// The emission engine and its event stream.
pub mod engine {
    pub use typeweld_engine::*;
}
