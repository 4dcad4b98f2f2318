//! Definition model for one compilation unit.
//!
//! The IR producer hands the engine a finite sequence of
//! [`TypeDefinition`]s in declaration order. Definitions are immutable once
//! constructed; the engine builds its own resolved forms from them.

use crate::attrs::AttrBag;
use crate::types::TypeReference;
use serde::{Deserialize, Serialize};

/// Top-level definition variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDefinition {
    /// Struct with named fields.
    Struct(StructDef),
    /// Tagged enum.
    Enum(EnumDef),
    /// Type alias.
    Alias(AliasDef),
    /// Named constant.
    Const(ConstDef),
}

impl TypeDefinition {
    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Enum(e) => &e.name,
            Self::Alias(a) => &a.name,
            Self::Const(c) => &c.name,
        }
    }

    /// Returns the comment lines attached to the definition.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        match self {
            Self::Struct(s) => &s.comments,
            Self::Enum(e) => &e.comments,
            Self::Alias(a) => &a.comments,
            Self::Const(c) => &c.comments,
        }
    }

    /// Returns the definition's attribute bag.
    #[must_use]
    pub fn attrs(&self) -> &AttrBag {
        match self {
            Self::Struct(s) => &s.attrs,
            Self::Enum(e) => &e.attrs,
            Self::Alias(a) => &a.attrs,
            Self::Const(c) => &c.attrs,
        }
    }

    /// Returns true if this is a struct definition.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Returns true if this is an enum definition.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns true if this is an alias definition.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }

    /// Returns true if this is a constant definition.
    #[must_use]
    pub const fn is_const(&self) -> bool {
        matches!(self, Self::Const(_))
    }
}

/// Struct definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    /// Definition name, unique within the unit.
    pub name: String,
    /// Comment lines attached to the definition.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl StructDef {
    /// Creates an empty struct definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            attrs: AttrBag::new(),
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }
}

/// Field of a struct or of a struct-like variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Declared identifier.
    pub name: String,
    /// Value type.
    pub ty: TypeReference,
    /// Comment lines attached to the field.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
}

impl Field {
    /// Creates a field with no comments or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            comments: Vec::new(),
            attrs: AttrBag::new(),
        }
    }
}

/// Enum definition. Every enum lowers to the tagged-union wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Definition name, unique within the unit.
    pub name: String,
    /// Comment lines attached to the definition.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
    /// Variants in declaration order.
    pub variants: Vec<EnumVariant>,
}

impl EnumDef {
    /// Creates an empty enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            attrs: AttrBag::new(),
            variants: Vec::new(),
        }
    }

    /// Adds a variant.
    pub fn add_variant(&mut self, variant: EnumVariant) {
        self.variants.push(variant);
    }
}

/// Enum variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumVariant {
    /// Declared identifier. The wire discriminant is resolved from this
    /// plus the variant's attributes.
    pub name: String,
    /// Payload shape.
    pub shape: VariantShape,
    /// Comment lines attached to the variant.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
}

impl EnumVariant {
    /// Creates a variant with no comments or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: VariantShape) -> Self {
        Self {
            name: name.into(),
            shape,
            comments: Vec::new(),
            attrs: AttrBag::new(),
        }
    }

    /// Creates a payload-free variant.
    #[must_use]
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, VariantShape::Unit)
    }
}

/// Variant payload shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariantShape {
    /// No payload.
    Unit,
    /// Single positional payload type.
    Tuple(TypeReference),
    /// Named fields unique to this variant.
    AnonymousStruct(Vec<Field>),
}

impl VariantShape {
    /// Returns true if the variant carries no payload.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

/// Type alias definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasDef {
    /// Definition name, unique within the unit.
    pub name: String,
    /// Comment lines attached to the definition.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
    /// The aliased type.
    pub target: TypeReference,
}

impl AliasDef {
    /// Creates an alias definition.
    #[must_use]
    pub fn new(name: impl Into<String>, target: TypeReference) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            attrs: AttrBag::new(),
            target,
        }
    }
}

/// Constant definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDef {
    /// Definition name, unique within the unit.
    pub name: String,
    /// Comment lines attached to the definition.
    pub comments: Vec<String>,
    /// Recognized attributes.
    pub attrs: AttrBag,
    /// Constant value.
    pub value: ConstValue,
}

impl ConstDef {
    /// Creates a constant definition.
    #[must_use]
    pub fn new(name: impl Into<String>, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            attrs: AttrBag::new(),
            value,
        }
    }
}

/// Constant payload kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstValue {
    /// String constant.
    Str(String),
    /// Integer constant.
    Int(i128),
}

impl ConstValue {
    /// Returns true if this is a string constant.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }
}
