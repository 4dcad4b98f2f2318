//! Emitter driver.
//!
//! Orchestrates the pipeline over one compilation unit: resolve names,
//! filter for the requested platform, lower enums, order declarations and
//! build the event stream. Units are independent; the driver borrows the
//! shared configuration and codec registry and never mutates them, so one
//! driver can serve units concurrently.

use crate::error::EngineError;
use crate::events::{
    EmitAlias, EmitConst, EmitEnumDiscriminants, EmitEnumVariant, EmitEvent, EmitStruct,
    EmitSyntheticContainer, FieldSpec, PayloadSpec,
};
use crate::filter::{filter_definitions, propagate_removals, DanglingReference};
use crate::literal;
use crate::order::sort_definitions;
use crate::resolve::{resolve_definitions, ResolvedDef, ResolvedField};
use crate::tagging::{lower_enum, LoweredEnum};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};
use typeweld_codec::ScalarCodecRegistry;
use typeweld_model::{EngineConfig, ScalarKind, TypeDefinition, TypeReference};

/// Result of emitting one compilation unit.
#[derive(Debug)]
pub struct EmissionUnit {
    /// Declaration events in emission order.
    pub events: Vec<EmitEvent>,
    /// Dangling-reference warnings recorded while filtering.
    pub warnings: Vec<DanglingReference>,
    /// Definition-level errors. Each offending definition was dropped;
    /// the rest of the unit emitted.
    pub errors: Vec<EngineError>,
}

impl EmissionUnit {
    /// Returns true if every definition emitted without errors or
    /// warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Drives emission for compilation units sharing one configuration and
/// codec registry.
#[derive(Debug, Clone, Copy)]
pub struct EmitterDriver<'a> {
    config: &'a EngineConfig,
    registry: &'a ScalarCodecRegistry,
}

impl<'a> EmitterDriver<'a> {
    /// Creates a driver over a configuration and codec registry.
    #[must_use]
    pub fn new(config: &'a EngineConfig, registry: &'a ScalarCodecRegistry) -> Self {
        Self { config, registry }
    }

    /// Emits one compilation unit.
    ///
    /// Returns `Err` only for a reference cycle no declaration order can
    /// satisfy. Attribute conflicts and duplicate discriminants drop the
    /// offending definition and are reported in [`EmissionUnit::errors`].
    pub fn emit(&self, defs: &[TypeDefinition]) -> Result<EmissionUnit, EngineError> {
        info!(definitions = defs.len(), "emitting compilation unit");
        let (resolved, mut errors) = resolve_definitions(defs, self.config);
        let mut removed: BTreeSet<String> = {
            let surviving: BTreeSet<&str> = resolved.iter().map(ResolvedDef::name).collect();
            defs.iter()
                .map(TypeDefinition::name)
                .filter(|name| !surviving.contains(*name))
                .map(ToString::to_string)
                .collect()
        };

        let mut warnings = Vec::new();
        let filtered =
            filter_definitions(resolved, self.config.platform(), &mut removed, &mut warnings);
        debug!(surviving = filtered.len(), "filtered for target");

        // Lower enums after filtering: a discriminant clash between
        // variants that cannot coexist on one platform is not a clash.
        let mut lowered: HashMap<String, LoweredEnum> = HashMap::new();
        let mut kept = Vec::with_capacity(filtered.len());
        let mut dropped_enum = false;
        for def in filtered {
            if let ResolvedDef::Enum(en) = &def {
                match lower_enum(en) {
                    Ok(low) => {
                        lowered.insert(en.name.clone(), low);
                    }
                    Err(err) => {
                        warn!(definition = %en.name, %err, "dropping definition");
                        errors.push(err);
                        removed.insert(en.name.clone());
                        dropped_enum = true;
                        continue;
                    }
                }
            }
            kept.push(def);
        }
        let survivors = if dropped_enum {
            propagate_removals(kept, &mut removed, &mut warnings)
        } else {
            kept
        };

        let ordered = sort_definitions(survivors, |kind| kind.is_load_bearing())?;

        let mut events = Vec::new();
        for def in &ordered {
            match def {
                ResolvedDef::Struct(def) => events.push(EmitEvent::Struct(EmitStruct {
                    name: def.name.clone(),
                    comments: def.comments.clone(),
                    fields: def.fields.iter().map(|field| self.field_spec(field)).collect(),
                })),
                ResolvedDef::Enum(def) => {
                    if let Some(low) = lowered.get(&def.name) {
                        self.enum_events(low, &def.comments, &mut events);
                    }
                }
                ResolvedDef::Alias(def) => events.push(EmitEvent::Alias(EmitAlias {
                    name: def.name.clone(),
                    target: def.target.clone(),
                    comments: def.comments.clone(),
                })),
                ResolvedDef::Const(def) => events.push(EmitEvent::Const(EmitConst {
                    name: def.name.clone(),
                    value: def.value.clone(),
                    literal: literal::render(&def.value),
                    comments: def.comments.clone(),
                })),
            }
        }
        info!(
            events = events.len(),
            warnings = warnings.len(),
            errors = errors.len(),
            "unit emitted"
        );
        Ok(EmissionUnit { events, warnings, errors })
    }

    fn field_spec(&self, field: &ResolvedField) -> FieldSpec {
        let codec = self.codec_binding(&field.ty, &field.ident);
        FieldSpec {
            ident: field.ident.clone(),
            wire: field.wire.clone(),
            ty: field.ty.clone(),
            optional: field.ty.is_optional() || field.has_default,
            has_default: field.has_default,
            codec,
            comments: field.comments.clone(),
        }
    }

    fn codec_binding(&self, ty: &TypeReference, ident: &str) -> Option<ScalarKind> {
        let kind = ty.codec_kind()?;
        if !self.registry.contains(kind) {
            warn!(field = ident, kind = kind.name(), "no codec registered for scalar kind");
        }
        Some(kind)
    }

    fn enum_events(&self, low: &LoweredEnum, comments: &[String], events: &mut Vec<EmitEvent>) {
        for container in &low.containers {
            events.push(EmitEvent::SyntheticContainer(EmitSyntheticContainer {
                name: container.name.clone(),
                enum_name: low.name.clone(),
                variant: container.variant.clone(),
                comments: container.comments.clone(),
                fields: container.fields.iter().map(|field| self.field_spec(field)).collect(),
            }));
        }
        events.push(EmitEvent::EnumDiscriminants(EmitEnumDiscriminants {
            name: low.carrier_name.clone(),
            enum_name: low.name.clone(),
            constants: low.constants.clone(),
            union_members: low.union_members(),
            comments: comments.to_vec(),
        }));
        for variant in &low.variants {
            let payload = variant.payload.as_ref().map(|ty| PayloadSpec {
                key: self.config.payload_key.clone(),
                ty: ty.clone(),
                codec: ty.codec_kind(),
            });
            events.push(EmitEvent::EnumVariant(EmitEnumVariant {
                name: variant.name.clone(),
                enum_name: low.name.clone(),
                discriminant: variant.discriminant.clone(),
                constant: variant.constant.clone(),
                discriminant_key: self.config.discriminant_key.clone(),
                payload,
                comments: variant.comments.clone(),
            }));
        }
    }
}

/// Emits one compilation unit with the given configuration and registry.
pub fn emit_unit(
    defs: &[TypeDefinition],
    config: &EngineConfig,
    registry: &ScalarCodecRegistry,
) -> Result<EmissionUnit, EngineError> {
    EmitterDriver::new(config, registry).emit(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeweld_model::{
        ConstDef, ConstValue, EnumDef, EnumVariant, Field, Primitive, ScalarKind, StructDef,
        VariantShape,
    };

    fn emit(defs: &[TypeDefinition]) -> EmissionUnit {
        let config = EngineConfig::default();
        let registry = ScalarCodecRegistry::default();
        emit_unit(defs, &config, &registry).unwrap()
    }

    fn event_names(unit: &EmissionUnit) -> Vec<&str> {
        unit.events.iter().map(EmitEvent::name).collect()
    }

    fn strukt(name: &str, fields: &[(&str, TypeReference)]) -> TypeDefinition {
        let mut def = StructDef::new(name);
        for (field_name, ty) in fields {
            def.add_field(Field::new(*field_name, ty.clone()));
        }
        TypeDefinition::Struct(def)
    }

    #[test]
    fn test_unit_emits_in_dependency_order() {
        let defs = vec![
            strukt("Outer", &[("inner", TypeReference::named("Inner"))]),
            strukt("Inner", &[("value", TypeReference::Primitive(Primitive::U32))]),
        ];
        let unit = emit(&defs);
        assert!(unit.is_clean());
        assert_eq!(event_names(&unit), ["Inner", "Outer"]);
    }

    #[test]
    fn test_weak_edge_cycle_emits_forward_declaration_order() {
        let defs = vec![
            strukt("A", &[]),
            strukt("B", &[("a", TypeReference::named("A"))]),
            strukt("C", &[("b", TypeReference::named("B"))]),
            strukt(
                "D",
                &[
                    ("c", TypeReference::named("C")),
                    ("e", TypeReference::optional(TypeReference::named("E"))),
                ],
            ),
            strukt("E", &[("d", TypeReference::named("D"))]),
        ];
        let unit = emit(&defs);
        assert_eq!(event_names(&unit), ["A", "B", "C", "E", "D"]);
    }

    #[test]
    fn test_all_strong_cycle_aborts_unit() {
        let defs = vec![
            strukt("A", &[("b", TypeReference::named("B"))]),
            strukt("B", &[("a", TypeReference::named("A"))]),
        ];
        let config = EngineConfig::default();
        let registry = ScalarCodecRegistry::default();
        let err = emit_unit(&defs, &config, &registry).unwrap_err();
        assert!(err.is_fatal_for_unit());
    }

    #[test]
    fn test_enum_event_order_and_payload_keys() {
        let mut def = EnumDef::new("TestEnum");
        def.add_variant(EnumVariant::unit("Variant1"));
        def.add_variant(EnumVariant::new(
            "Variant5",
            VariantShape::Tuple(TypeReference::Primitive(Primitive::Str)),
        ));
        def.add_variant(EnumVariant::new(
            "Variant7",
            VariantShape::AnonymousStruct(vec![Field::new(
                "field",
                TypeReference::Primitive(Primitive::U64),
            )]),
        ));
        let unit = emit(&[TypeDefinition::Enum(def)]);

        assert_eq!(
            event_names(&unit),
            [
                "TestEnumVariant7Inner",
                "TestEnumTypes",
                "TestEnumVariant1",
                "TestEnumVariant5",
                "TestEnumVariant7",
            ]
        );
        match &unit.events[1] {
            EmitEvent::EnumDiscriminants(carrier) => {
                assert_eq!(carrier.enum_name, "TestEnum");
                assert_eq!(
                    carrier.union_members,
                    ["TestEnumVariant1", "TestEnumVariant5", "TestEnumVariant7"]
                );
                assert_eq!(carrier.constants.get("VARIANT_1"), Some(&"Variant1".to_string()));
            }
            other => panic!("expected carrier, got {other:?}"),
        }
        match &unit.events[2] {
            EmitEvent::EnumVariant(variant) => {
                assert_eq!(variant.discriminant_key, "type");
                assert!(variant.payload.is_none());
            }
            other => panic!("expected variant, got {other:?}"),
        }
        match &unit.events[4] {
            EmitEvent::EnumVariant(variant) => {
                let payload = variant.payload.as_ref().unwrap();
                assert_eq!(payload.key, "content");
                assert_eq!(payload.ty, TypeReference::named("TestEnumVariant7Inner"));
            }
            other => panic!("expected variant, got {other:?}"),
        }
    }

    #[test]
    fn test_configured_tag_keys_flow_into_events() {
        let mut def = EnumDef::new("Msg");
        def.add_variant(EnumVariant::new(
            "Text",
            VariantShape::Tuple(TypeReference::Primitive(Primitive::Str)),
        ));
        let config: EngineConfig = serde_json::from_value(serde_json::json!({
            "discriminant_key": "kind",
            "payload_key": "data"
        }))
        .unwrap();
        let registry = ScalarCodecRegistry::default();
        let unit = emit_unit(&[TypeDefinition::Enum(def)], &config, &registry).unwrap();
        match &unit.events[1] {
            EmitEvent::EnumVariant(variant) => {
                assert_eq!(variant.discriminant_key, "kind");
                assert_eq!(variant.payload.as_ref().unwrap().key, "data");
            }
            other => panic!("expected variant, got {other:?}"),
        }
    }

    #[test]
    fn test_codec_bindings_and_optionality() {
        let defs = vec![strukt(
            "Record",
            &[
                ("payload", TypeReference::Primitive(Primitive::Bytes)),
                (
                    "seen_at",
                    TypeReference::optional(TypeReference::Primitive(Primitive::Timestamp)),
                ),
                ("name", TypeReference::Primitive(Primitive::Str)),
            ],
        )];
        let unit = emit(&defs);
        match &unit.events[0] {
            EmitEvent::Struct(record) => {
                assert_eq!(record.fields[0].codec, Some(ScalarKind::Bytes));
                assert!(!record.fields[0].optional);
                assert_eq!(record.fields[1].codec, Some(ScalarKind::Timestamp));
                assert!(record.fields[1].optional);
                assert_eq!(record.fields[2].codec, None);
            }
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn test_default_makes_field_optional() {
        let mut def = StructDef::new("Config");
        let mut field = Field::new("retries", TypeReference::Primitive(Primitive::U32));
        field.attrs.has_default = true;
        def.add_field(field);
        let unit = emit(&[TypeDefinition::Struct(def)]);
        match &unit.events[0] {
            EmitEvent::Struct(config) => {
                assert!(config.fields[0].optional);
                assert!(config.fields[0].has_default);
            }
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn test_const_event_carries_rendered_literal() {
        let defs = vec![
            TypeDefinition::Const(ConstDef::new("MAX_RETRIES", ConstValue::Int(5))),
            TypeDefinition::Const(ConstDef::new(
                "PATTERN",
                ConstValue::Str("a\\d+".to_string()),
            )),
        ];
        let unit = emit(&defs);
        match &unit.events[1] {
            EmitEvent::Const(konst) => {
                assert_eq!(konst.literal, "r\"\"\"a\\d+\"\"\"");
            }
            other => panic!("expected const, got {other:?}"),
        }
    }

    #[test]
    fn test_platform_filter_drops_and_propagates() {
        let mut mac_only = StructDef::new("MacSettings");
        mac_only.attrs.add_target_os("macos");
        let defs = vec![
            TypeDefinition::Struct(mac_only),
            strukt("Settings", &[("mac", TypeReference::named("MacSettings"))]),
            strukt("Free", &[]),
        ];
        let config: EngineConfig =
            serde_json::from_value(serde_json::json!({ "requested_platform": "ios" })).unwrap();
        let registry = ScalarCodecRegistry::default();
        let unit = emit_unit(&defs, &config, &registry).unwrap();
        assert_eq!(event_names(&unit), ["Free"]);
        assert_eq!(unit.warnings.len(), 1);
        assert_eq!(unit.warnings[0].definition, "Settings");
        assert!(unit.errors.is_empty());
    }

    #[test]
    fn test_attribute_conflict_drops_definition_and_dependents() {
        let mut bad = StructDef::new("Bad");
        let mut conflicted = Field::new("value", TypeReference::Primitive(Primitive::Bool));
        conflicted.attrs.add_rename("a");
        conflicted.attrs.add_rename("b");
        bad.add_field(conflicted);
        let defs = vec![
            TypeDefinition::Struct(bad),
            strukt("Dependent", &[("bad", TypeReference::named("Bad"))]),
            strukt("Free", &[]),
        ];
        let unit = emit(&defs);
        assert_eq!(event_names(&unit), ["Free"]);
        assert_eq!(unit.errors.len(), 1);
        assert_eq!(unit.warnings.len(), 1);
        assert_eq!(unit.warnings[0].definition, "Dependent");
        assert_eq!(unit.warnings[0].referenced, "Bad");
    }

    #[test]
    fn test_duplicate_discriminant_drops_enum_and_dependents() {
        let mut def = EnumDef::new("Event");
        def.add_variant(EnumVariant::unit("Created"));
        let mut renamed = EnumVariant::unit("Added");
        renamed.attrs.add_rename("Created");
        def.add_variant(renamed);
        let defs = vec![
            TypeDefinition::Enum(def),
            strukt("Log", &[("last", TypeReference::named("Event"))]),
            strukt("Free", &[]),
        ];
        let unit = emit(&defs);
        assert_eq!(event_names(&unit), ["Free"]);
        assert_eq!(unit.errors.len(), 1);
        assert_eq!(unit.warnings.len(), 1);
        assert_eq!(unit.warnings[0].referenced, "Event");
    }

    #[test]
    fn test_discriminant_clash_resolved_by_platform_filter() {
        // The clashing variants never coexist on one platform, so the
        // filtered unit emits cleanly.
        let mut def = EnumDef::new("Path");
        let mut mac = EnumVariant::unit("Mac");
        mac.attrs.add_rename("native");
        mac.attrs.add_target_os("macos");
        let mut ios = EnumVariant::unit("Ios");
        ios.attrs.add_rename("native");
        ios.attrs.add_target_os("ios");
        def.add_variant(mac);
        def.add_variant(ios);
        let config: EngineConfig =
            serde_json::from_value(serde_json::json!({ "requested_platform": "ios" })).unwrap();
        let registry = ScalarCodecRegistry::default();
        let unit = emit_unit(&[TypeDefinition::Enum(def)], &config, &registry).unwrap();
        assert!(unit.is_clean());
        assert_eq!(event_names(&unit), ["PathTypes", "PathIos"]);
    }

    #[test]
    fn test_skipped_variant_leaves_enum_intact() {
        let mut def = EnumDef::new("State");
        def.add_variant(EnumVariant::unit("On"));
        let mut hidden = EnumVariant::unit("Hidden");
        hidden.attrs.skip = true;
        def.add_variant(hidden);
        let unit = emit(&[TypeDefinition::Enum(def)]);
        assert_eq!(event_names(&unit), ["StateTypes", "StateOn"]);
    }

    #[test]
    fn test_emission_is_deterministic() {
        let defs = vec![
            strukt("B", &[("a", TypeReference::named("A"))]),
            strukt("A", &[]),
            TypeDefinition::Const(ConstDef::new("N", ConstValue::Int(1))),
        ];
        let first = emit(&defs);
        let second = emit(&defs);
        assert_eq!(first.events, second.events);
    }
}
