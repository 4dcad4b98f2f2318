//! Emission events.
//!
//! The engine's output is an ordered stream of fully resolved declaration
//! events. Every name, discriminant, codec binding and literal is final;
//! a target writer renders events into source text without consulting the
//! input again.

use indexmap::IndexMap;
use serde::Serialize;
use typeweld_model::{ConstValue, ScalarKind, TypeReference};

/// One resolved field carried on an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Identifier for the declaration, keyword-escaped when needed.
    pub ident: String,
    /// Wire name used as the serialized object key.
    pub wire: String,
    /// Field type.
    pub ty: TypeReference,
    /// Field may be absent or null on the wire.
    pub optional: bool,
    /// Field carries an absent-value fallback.
    pub has_default: bool,
    /// Codec binding for a scalar kind with no native wire form.
    pub codec: Option<ScalarKind>,
    /// Comment lines.
    pub comments: Vec<String>,
}

/// Payload carried by a non-unit variant declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSpec {
    /// Wire key holding the payload.
    pub key: String,
    /// Payload type.
    pub ty: TypeReference,
    /// Codec binding for the payload type.
    pub codec: Option<ScalarKind>,
}

/// Struct declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitStruct {
    /// Type name.
    pub name: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Fields in declared order.
    pub fields: Vec<FieldSpec>,
}

/// Synthesized variant payload container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitSyntheticContainer {
    /// Container type name.
    pub name: String,
    /// Owning enum.
    pub enum_name: String,
    /// Identifier of the source variant.
    pub variant: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Payload fields in declared order.
    pub fields: Vec<FieldSpec>,
}

/// Discriminant carrier for one enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitEnumDiscriminants {
    /// Carrier type name.
    pub name: String,
    /// Owning enum; the closed union is declared under this name.
    pub enum_name: String,
    /// Constant name to wire discriminant, in variant order.
    pub constants: IndexMap<String, String>,
    /// Per-variant declaration names forming the closed union.
    pub union_members: Vec<String>,
    /// Comment lines from the enum definition.
    pub comments: Vec<String>,
}

/// Tagged variant declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitEnumVariant {
    /// Declaration name.
    pub name: String,
    /// Owning enum.
    pub enum_name: String,
    /// Wire discriminant value.
    pub discriminant: String,
    /// Carrier constant naming the discriminant.
    pub constant: String,
    /// Wire key of the discriminant field.
    pub discriminant_key: String,
    /// Payload; `None` for a unit variant.
    pub payload: Option<PayloadSpec>,
    /// Comment lines from the variant.
    pub comments: Vec<String>,
}

/// Alias declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitAlias {
    /// Alias name.
    pub name: String,
    /// Aliased type.
    pub target: TypeReference,
    /// Comment lines.
    pub comments: Vec<String>,
}

/// Constant declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitConst {
    /// Constant name.
    pub name: String,
    /// Semantic value.
    pub value: ConstValue,
    /// Rendered literal text.
    pub literal: String,
    /// Comment lines.
    pub comments: Vec<String>,
}

/// One declaration event.
///
/// Events arrive in emission order: for an enum, synthesized containers
/// first, then the discriminant carrier, then one variant event per
/// variant in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EmitEvent {
    /// Struct declaration.
    Struct(EmitStruct),
    /// Synthesized variant payload container.
    SyntheticContainer(EmitSyntheticContainer),
    /// Discriminant carrier for one enum.
    EnumDiscriminants(EmitEnumDiscriminants),
    /// Tagged variant declaration.
    EnumVariant(EmitEnumVariant),
    /// Alias declaration.
    Alias(EmitAlias),
    /// Constant declaration.
    Const(EmitConst),
}

impl EmitEvent {
    /// Returns the name the event declares.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(event) => &event.name,
            Self::SyntheticContainer(event) => &event.name,
            Self::EnumDiscriminants(event) => &event.name,
            Self::EnumVariant(event) => &event.name,
            Self::Alias(event) => &event.name,
            Self::Const(event) => &event.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeweld_model::Primitive;

    #[test]
    fn test_event_names() {
        let event = EmitEvent::Alias(EmitAlias {
            name: "UserId".to_string(),
            target: TypeReference::Primitive(Primitive::U64),
            comments: Vec::new(),
        });
        assert_eq!(event.name(), "UserId");
    }

    #[test]
    fn test_events_serialize() {
        let event = EmitEvent::Const(EmitConst {
            name: "MAX_RETRIES".to_string(),
            value: ConstValue::Int(5),
            literal: "5".to_string(),
            comments: Vec::new(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["Const"]["literal"], "5");
    }
}
