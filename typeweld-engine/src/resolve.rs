//! Attribute resolution.
//!
//! Flattens every definition into a resolved form where each field and
//! variant carries its final identifier and wire name. A wire name is
//! picked per item: explicit rename first, then the container's case
//! convention, then the configured default convention, then the
//! identifier unchanged. Identifiers colliding with a reserved word get a
//! trailing underscore; the wire name is never touched by escaping.

use crate::error::EngineError;
use tracing::{debug, warn};
use typeweld_model::{
    AttrBag, CaseConvention, ConstValue, EngineConfig, EnumDef, EnumVariant, Field, StructDef,
    TypeDefinition, TypeReference, VariantShape,
};

/// Definition with all names resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDef {
    /// Struct with resolved fields.
    Struct(ResolvedStruct),
    /// Enum with resolved discriminants.
    Enum(ResolvedEnum),
    /// Alias in resolved form.
    Alias(ResolvedAlias),
    /// Constant in resolved form.
    Const(ResolvedConst),
}

impl ResolvedDef {
    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::Alias(def) => &def.name,
            Self::Const(def) => &def.name,
        }
    }

    /// Returns the platform tags on the definition.
    #[must_use]
    pub fn target_tags(&self) -> &[String] {
        match self {
            Self::Struct(def) => &def.target_tags,
            Self::Enum(def) => &def.target_tags,
            Self::Alias(def) => &def.target_tags,
            Self::Const(def) => &def.target_tags,
        }
    }
}

/// Struct with every field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStruct {
    /// Type name.
    pub name: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Platform tags.
    pub target_tags: Vec<String>,
    /// Fields in declared order.
    pub fields: Vec<ResolvedField>,
}

/// Field with its identifier and wire name fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Identifier for declarations, keyword-escaped when needed.
    pub ident: String,
    /// Wire name used as the serialized object key.
    pub wire: String,
    /// Field type.
    pub ty: TypeReference,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Field carries an absent-value fallback.
    pub has_default: bool,
    /// Field is excluded from emission.
    pub skip: bool,
    /// Platform tags.
    pub target_tags: Vec<String>,
}

/// Enum with every variant resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnum {
    /// Type name.
    pub name: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Platform tags.
    pub target_tags: Vec<String>,
    /// Variants in declared order.
    pub variants: Vec<ResolvedVariant>,
}

/// Variant with its wire discriminant fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    /// Variant identifier.
    pub ident: String,
    /// Wire discriminant value.
    pub discriminant: String,
    /// Payload shape.
    pub shape: ResolvedShape,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Variant is excluded from emission.
    pub skip: bool,
    /// Platform tags.
    pub target_tags: Vec<String>,
}

/// Payload shape of a resolved variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedShape {
    /// No payload.
    Unit,
    /// Single unnamed payload.
    Tuple(TypeReference),
    /// Inline named fields, resolved under the variant's convention.
    AnonymousStruct(Vec<ResolvedField>),
}

/// Alias in resolved form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAlias {
    /// Alias name.
    pub name: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Platform tags.
    pub target_tags: Vec<String>,
    /// Aliased type.
    pub target: TypeReference,
}

/// Constant in resolved form.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConst {
    /// Constant name.
    pub name: String,
    /// Comment lines.
    pub comments: Vec<String>,
    /// Platform tags.
    pub target_tags: Vec<String>,
    /// Constant value.
    pub value: ConstValue,
}

/// Resolves every definition in a unit.
///
/// Definitions with contradictory attributes are dropped and their errors
/// collected; the rest survive. Input order is preserved.
pub fn resolve_definitions(
    defs: &[TypeDefinition],
    config: &EngineConfig,
) -> (Vec<ResolvedDef>, Vec<EngineError>) {
    let mut resolved = Vec::with_capacity(defs.len());
    let mut errors = Vec::new();
    for def in defs {
        match resolve_definition(def, config) {
            Ok(def) => resolved.push(def),
            Err(err) => {
                warn!(definition = def.name(), %err, "dropping definition");
                errors.push(err);
            }
        }
    }
    (resolved, errors)
}

/// Resolves one definition.
pub fn resolve_definition(
    def: &TypeDefinition,
    config: &EngineConfig,
) -> Result<ResolvedDef, EngineError> {
    match def {
        TypeDefinition::Struct(def) => resolve_struct(def, config).map(ResolvedDef::Struct),
        TypeDefinition::Enum(def) => resolve_enum(def, config).map(ResolvedDef::Enum),
        TypeDefinition::Alias(def) => Ok(ResolvedDef::Alias(ResolvedAlias {
            name: def.name.clone(),
            comments: def.comments.clone(),
            target_tags: def.attrs.target_os.clone(),
            target: def.target.clone(),
        })),
        TypeDefinition::Const(def) => Ok(ResolvedDef::Const(ResolvedConst {
            name: def.name.clone(),
            comments: def.comments.clone(),
            target_tags: def.attrs.target_os.clone(),
            value: def.value.clone(),
        })),
    }
}

fn resolve_struct(def: &StructDef, config: &EngineConfig) -> Result<ResolvedStruct, EngineError> {
    let fields = resolve_fields(&def.name, &def.fields, def.attrs.rename_all, config)?;
    Ok(ResolvedStruct {
        name: def.name.clone(),
        comments: def.comments.clone(),
        target_tags: def.attrs.target_os.clone(),
        fields,
    })
}

fn resolve_enum(def: &EnumDef, config: &EngineConfig) -> Result<ResolvedEnum, EngineError> {
    let mut variants = Vec::with_capacity(def.variants.len());
    for variant in &def.variants {
        variants.push(resolve_variant(&def.name, variant, def.attrs.rename_all, config)?);
    }
    Ok(ResolvedEnum {
        name: def.name.clone(),
        comments: def.comments.clone(),
        target_tags: def.attrs.target_os.clone(),
        variants,
    })
}

fn resolve_variant(
    definition: &str,
    variant: &EnumVariant,
    convention: Option<CaseConvention>,
    config: &EngineConfig,
) -> Result<ResolvedVariant, EngineError> {
    let discriminant =
        resolve_wire_name(definition, &variant.name, &variant.attrs, convention, config)?;
    let shape = match &variant.shape {
        VariantShape::Unit => ResolvedShape::Unit,
        VariantShape::Tuple(ty) => ResolvedShape::Tuple(ty.clone()),
        VariantShape::AnonymousStruct(fields) => {
            // Inline payload fields follow the variant's own convention.
            let fields = resolve_fields(definition, fields, variant.attrs.rename_all, config)?;
            ResolvedShape::AnonymousStruct(fields)
        }
    };
    Ok(ResolvedVariant {
        ident: variant.name.clone(),
        discriminant,
        shape,
        comments: variant.comments.clone(),
        skip: variant.attrs.skip,
        target_tags: variant.attrs.target_os.clone(),
    })
}

fn resolve_fields(
    definition: &str,
    fields: &[Field],
    convention: Option<CaseConvention>,
    config: &EngineConfig,
) -> Result<Vec<ResolvedField>, EngineError> {
    let mut resolved = Vec::with_capacity(fields.len());
    for field in fields {
        let wire = resolve_wire_name(definition, &field.name, &field.attrs, convention, config)?;
        let ident = escape_ident(&field.name, config);
        if wire != field.name || ident != field.name {
            debug!(definition, field = %field.name, %ident, %wire, "resolved field name");
        }
        resolved.push(ResolvedField {
            ident,
            wire,
            ty: field.ty.clone(),
            comments: field.comments.clone(),
            has_default: field.attrs.has_default,
            skip: field.attrs.skip,
            target_tags: field.attrs.target_os.clone(),
        });
    }
    Ok(resolved)
}

/// Picks the wire name for one item.
///
/// An explicit rename always wins. Two distinct explicit renames on the
/// same item are a conflict; repeating the same rename is not.
fn resolve_wire_name(
    definition: &str,
    item: &str,
    attrs: &AttrBag,
    convention: Option<CaseConvention>,
    config: &EngineConfig,
) -> Result<String, EngineError> {
    if let Some(first) = attrs.renames.first() {
        if let Some(second) = attrs.renames.iter().find(|rename| *rename != first) {
            return Err(EngineError::attribute_conflict(definition, item, first, second));
        }
        return Ok(first.clone());
    }
    Ok(convention.unwrap_or(config.default_case).apply(item))
}

/// Escapes an identifier colliding with a reserved word.
fn escape_ident(ident: &str, config: &EngineConfig) -> String {
    if config.is_reserved(ident) {
        format!("{ident}_")
    } else {
        ident.to_string()
    }
}
