//! Target filtering and dangling-reference propagation.
//!
//! Removes definitions, fields and variants that do not apply to the
//! requested platform, drops skip-flagged items unconditionally, and
//! drops enums left with no variants. A surviving definition referencing
//! a dropped name is removed as well, transitively; each such removal is
//! recorded as a warning, never an error.

use crate::order::definition_edges;
use crate::resolve::{ResolvedDef, ResolvedShape};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Warning recorded when a surviving definition referenced a dropped
/// name. The referencing definition is removed with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Definition removed because of the reference.
    pub definition: String,
    /// The dropped name it referenced.
    pub referenced: String,
}

/// Returns true if an item tagged with `tags` applies to the requested
/// platform. An empty tag set applies everywhere; with no requested
/// platform only untagged items survive.
fn tags_apply(tags: &[String], platform: Option<&str>) -> bool {
    if tags.is_empty() {
        return true;
    }
    match platform {
        Some(platform) => tags.iter().any(|tag| tag == platform),
        None => false,
    }
}

/// Filters a unit for the requested platform.
///
/// `removed` carries names already dropped by earlier stages and is
/// extended with every name dropped here, so later references to them
/// propagate. Input order of the survivors is preserved.
pub fn filter_definitions(
    defs: Vec<ResolvedDef>,
    platform: Option<&str>,
    removed: &mut BTreeSet<String>,
    warnings: &mut Vec<DanglingReference>,
) -> Vec<ResolvedDef> {
    let mut kept = Vec::with_capacity(defs.len());
    for def in defs {
        if !tags_apply(def.target_tags(), platform) {
            debug!(definition = def.name(), "dropped by target filter");
            removed.insert(def.name().to_string());
            continue;
        }
        match def {
            ResolvedDef::Struct(mut def) => {
                def.fields
                    .retain(|field| !field.skip && tags_apply(&field.target_tags, platform));
                kept.push(ResolvedDef::Struct(def));
            }
            ResolvedDef::Enum(mut def) => {
                def.variants
                    .retain(|variant| !variant.skip && tags_apply(&variant.target_tags, platform));
                for variant in &mut def.variants {
                    if let ResolvedShape::AnonymousStruct(fields) = &mut variant.shape {
                        fields.retain(|field| {
                            !field.skip && tags_apply(&field.target_tags, platform)
                        });
                    }
                }
                if def.variants.is_empty() {
                    debug!(definition = %def.name, "dropped enum with no surviving variants");
                    removed.insert(def.name);
                    continue;
                }
                kept.push(ResolvedDef::Enum(def));
            }
            other => kept.push(other),
        }
    }
    propagate_removals(kept, removed, warnings)
}

/// Removes definitions referencing a removed name, to a fixpoint.
pub(crate) fn propagate_removals(
    mut defs: Vec<ResolvedDef>,
    removed: &mut BTreeSet<String>,
    warnings: &mut Vec<DanglingReference>,
) -> Vec<ResolvedDef> {
    loop {
        let mut dropped_this_round = false;
        let mut survivors = Vec::with_capacity(defs.len());
        for def in defs {
            let dangling = definition_edges(&def)
                .into_iter()
                .map(|(name, _)| name)
                .find(|name| removed.contains(name));
            match dangling {
                Some(referenced) => {
                    warn!(
                        definition = def.name(),
                        referenced = %referenced,
                        "removing definition with dangling reference"
                    );
                    removed.insert(def.name().to_string());
                    warnings.push(DanglingReference {
                        definition: def.name().to_string(),
                        referenced,
                    });
                    dropped_this_round = true;
                }
                None => survivors.push(def),
            }
        }
        defs = survivors;
        if !dropped_this_round {
            return defs;
        }
    }
}
