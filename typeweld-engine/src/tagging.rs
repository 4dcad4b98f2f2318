//! Enum tagging.
//!
//! Lowers each enum into the canonical tagged-union shape: a synthesized
//! container per struct-like payload, a discriminant carrier naming every
//! discriminant as a constant, and one declaration per variant. All
//! synthesized names are pure functions of the enum and variant
//! identifiers, so regeneration is stable.

use crate::error::EngineError;
use crate::resolve::{ResolvedEnum, ResolvedField, ResolvedShape};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use typeweld_model::rename::to_screaming_snake_case;
use typeweld_model::TypeReference;

/// Synthesized container name for a struct-like variant payload.
#[must_use]
pub fn container_name(enum_name: &str, variant_ident: &str) -> String {
    format!("{enum_name}{variant_ident}Inner")
}

/// Declaration name for one tagged variant.
#[must_use]
pub fn variant_decl_name(enum_name: &str, variant_ident: &str) -> String {
    format!("{enum_name}{variant_ident}")
}

/// Carrier type name holding an enum's discriminant constants.
#[must_use]
pub fn carrier_name(enum_name: &str) -> String {
    format!("{enum_name}Types")
}

/// Lowered form of one enum.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredEnum {
    /// Enum name; the closed union is declared under it.
    pub name: String,
    /// Discriminant carrier name.
    pub carrier_name: String,
    /// Constant name to wire discriminant, in variant order.
    pub constants: IndexMap<String, String>,
    /// Synthesized payload containers, in variant order.
    pub containers: Vec<SyntheticPayload>,
    /// Per-variant declarations, in variant order.
    pub variants: Vec<TaggedVariant>,
}

impl LoweredEnum {
    /// Names of the per-variant declarations forming the closed union.
    #[must_use]
    pub fn union_members(&self) -> Vec<String> {
        self.variants.iter().map(|variant| variant.name.clone()).collect()
    }
}

/// Synthesized container for one struct-like variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPayload {
    /// Container type name.
    pub name: String,
    /// Identifier of the source variant.
    pub variant: String,
    /// Comment lines for the generated type.
    pub comments: Vec<String>,
    /// Payload fields in declared order.
    pub fields: Vec<ResolvedField>,
}

/// One variant lowered to its tagged declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedVariant {
    /// Declaration name.
    pub name: String,
    /// Wire discriminant value.
    pub discriminant: String,
    /// Carrier constant naming the discriminant.
    pub constant: String,
    /// Payload type; `None` for a unit variant.
    pub payload: Option<TypeReference>,
    /// Comment lines from the variant.
    pub comments: Vec<String>,
}

/// Lowers an enum into its tagged form.
///
/// Fails when two variants resolve to the same wire discriminant, the
/// same carrier constant or the same synthesized declaration name.
pub fn lower_enum(def: &ResolvedEnum) -> Result<LoweredEnum, EngineError> {
    let mut constants = IndexMap::new();
    let mut containers: Vec<SyntheticPayload> = Vec::new();
    let mut variants: Vec<TaggedVariant> = Vec::new();
    let mut discriminants = BTreeSet::new();

    for variant in &def.variants {
        if !discriminants.insert(variant.discriminant.clone()) {
            return Err(EngineError::duplicate_discriminant(&def.name, &variant.discriminant));
        }
        let constant = to_screaming_snake_case(&variant.discriminant);
        if constants.insert(constant.clone(), variant.discriminant.clone()).is_some() {
            return Err(EngineError::duplicate_discriminant(&def.name, &constant));
        }

        let name = variant_decl_name(&def.name, &variant.ident);
        if variants.iter().any(|tagged| tagged.name == name) {
            return Err(EngineError::duplicate_discriminant(&def.name, &name));
        }

        let payload = match &variant.shape {
            ResolvedShape::Unit => None,
            ResolvedShape::Tuple(ty) => Some(ty.clone()),
            ResolvedShape::AnonymousStruct(fields) => {
                let container = container_name(&def.name, &variant.ident);
                if containers.iter().any(|existing| existing.name == container) {
                    return Err(EngineError::duplicate_discriminant(&def.name, &container));
                }
                containers.push(SyntheticPayload {
                    name: container.clone(),
                    variant: variant.ident.clone(),
                    comments: vec![format!(
                        "Generated type representing the anonymous struct variant `{}` of the `{}` enum",
                        variant.ident, def.name
                    )],
                    fields: fields.clone(),
                });
                Some(TypeReference::named(container))
            }
        };
        variants.push(TaggedVariant {
            name,
            discriminant: variant.discriminant.clone(),
            constant,
            payload,
            comments: variant.comments.clone(),
        });
    }

    Ok(LoweredEnum {
        name: def.name.clone(),
        carrier_name: carrier_name(&def.name),
        constants,
        containers,
        variants,
    })
}
