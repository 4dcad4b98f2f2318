//! Synthetic compilation units for benchmarks.

use typeweld_model::{
    EnumDef, EnumVariant, Field, Primitive, StructDef, TypeDefinition, TypeReference, VariantShape,
};

/// Builds `count` independent structs with a handful of primitive fields.
pub fn flat_unit(count: usize) -> Vec<TypeDefinition> {
    (0..count)
        .map(|index| {
            let mut def = StructDef::new(format!("Record{index}"));
            def.add_field(Field::new("id", TypeReference::Primitive(Primitive::U64)));
            def.add_field(Field::new("name", TypeReference::Primitive(Primitive::Str)));
            def.add_field(Field::new(
                "tags",
                TypeReference::sequence(TypeReference::Primitive(Primitive::Str)),
            ));
            def.add_field(Field::new(
                "payload",
                TypeReference::optional(TypeReference::Primitive(Primitive::Bytes)),
            ));
            TypeDefinition::Struct(def)
        })
        .collect()
}

/// Builds a chain where each struct references the next one declared, so
/// ordering has to walk the whole unit depth-first before emitting.
pub fn chained_unit(count: usize) -> Vec<TypeDefinition> {
    (0..count)
        .map(|index| {
            let mut def = StructDef::new(format!("Link{index}"));
            if index + 1 < count {
                def.add_field(Field::new("next", TypeReference::named(format!("Link{}", index + 1))));
            }
            def.add_field(Field::new("value", TypeReference::Primitive(Primitive::I64)));
            TypeDefinition::Struct(def)
        })
        .collect()
}

/// Builds one enum with `variants` variants cycling through the three
/// payload shapes, so tagging synthesizes containers and constants.
pub fn tagged_enum_unit(variants: usize) -> Vec<TypeDefinition> {
    let mut def = EnumDef::new("Wide");
    for index in 0..variants {
        let name = format!("Variant{index}");
        let variant = match index % 3 {
            0 => EnumVariant::unit(name),
            1 => EnumVariant::new(
                name,
                VariantShape::Tuple(TypeReference::Primitive(Primitive::Str)),
            ),
            _ => EnumVariant::new(
                name,
                VariantShape::AnonymousStruct(vec![
                    Field::new("left", TypeReference::Primitive(Primitive::U32)),
                    Field::new("right", TypeReference::Primitive(Primitive::U32)),
                ]),
            ),
        };
        def.add_variant(variant);
    }
    vec![TypeDefinition::Enum(def)]
}

/// Builds a JSON array of `len` byte values for codec benchmarks.
#[must_use]
pub fn byte_array_value(len: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (0..len)
            .map(|index| serde_json::Value::from((index % 256) as u64))
            .collect(),
    )
}
