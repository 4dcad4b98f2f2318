//! Dependency ordering.
//!
//! Produces the emission order for a filtered unit: a depth-first
//! post-order over the full reference graph, visiting roots in
//! declaration order and out-edges in field order. Weak edges are
//! traversed like strong ones; they only matter when a back edge closes a
//! cycle. A cycle crossing at least one non-load-bearing edge is cut at
//! the back edge and traversal continues; a cycle made entirely of
//! load-bearing edges admits no order and is fatal.

use crate::error::EngineError;
use crate::resolve::{ResolvedDef, ResolvedShape};
use std::collections::HashMap;
use tracing::debug;
use typeweld_model::TypeReference;

/// Dependency edge classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Direct, sequence-element or mapping reference. The target must be
    /// declared before the referencing definition.
    Strong,
    /// Reference beneath an `Optional` wrapper. The value can be absent
    /// at construction time, so a forward declaration is tolerated.
    Weak,
}

impl EdgeKind {
    /// Returns true if the edge constrains emission order.
    #[must_use]
    pub const fn is_load_bearing(&self) -> bool {
        matches!(self, Self::Strong)
    }
}

/// Collects named references in `ty` in depth-first order, classifying
/// each as weak when it sits beneath an `Optional` wrapper. Primitives
/// and external references produce no edges.
#[must_use]
pub fn reference_edges(ty: &TypeReference) -> Vec<(String, EdgeKind)> {
    fn walk(ty: &TypeReference, in_optional: bool, out: &mut Vec<(String, EdgeKind)>) {
        match ty {
            TypeReference::Primitive(_) | TypeReference::External { .. } => {}
            TypeReference::Named(name) => {
                let kind = if in_optional { EdgeKind::Weak } else { EdgeKind::Strong };
                out.push((name.clone(), kind));
            }
            TypeReference::Optional(inner) => walk(inner, true, out),
            TypeReference::Sequence(inner) => walk(inner, in_optional, out),
            TypeReference::Mapping(key, value) => {
                walk(key, in_optional, out);
                walk(value, in_optional, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(ty, false, &mut out);
    out
}

/// Collects a definition's outgoing edges in declaration order.
#[must_use]
pub fn definition_edges(def: &ResolvedDef) -> Vec<(String, EdgeKind)> {
    match def {
        ResolvedDef::Struct(def) => def
            .fields
            .iter()
            .flat_map(|field| reference_edges(&field.ty))
            .collect(),
        ResolvedDef::Enum(def) => def
            .variants
            .iter()
            .flat_map(|variant| match &variant.shape {
                ResolvedShape::Unit => Vec::new(),
                ResolvedShape::Tuple(ty) => reference_edges(ty),
                ResolvedShape::AnonymousStruct(fields) => fields
                    .iter()
                    .flat_map(|field| reference_edges(&field.ty))
                    .collect(),
            })
            .collect(),
        ResolvedDef::Alias(def) => reference_edges(&def.target),
        ResolvedDef::Const(_) => Vec::new(),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Orders definitions for emission.
///
/// `load_bearing` decides which edges constrain ordering. References to
/// names absent from `defs` are ignored. The returned order is a pure
/// function of the input: declaration order breaks all ties.
pub fn sort_definitions(
    defs: Vec<ResolvedDef>,
    load_bearing: impl Fn(EdgeKind) -> bool,
) -> Result<Vec<ResolvedDef>, EngineError> {
    let index: HashMap<&str, usize> = defs
        .iter()
        .enumerate()
        .map(|(position, def)| (def.name(), position))
        .collect();
    let adjacency: Vec<Vec<(usize, EdgeKind)>> = defs
        .iter()
        .map(|def| {
            definition_edges(def)
                .into_iter()
                .filter_map(|(name, kind)| index.get(name.as_str()).map(|&dep| (dep, kind)))
                .collect()
        })
        .collect();
    let names: Vec<String> = defs.iter().map(|def| def.name().to_string()).collect();

    let mut marks = vec![Mark::Unvisited; defs.len()];
    let mut stack = Vec::new();
    let mut order = Vec::with_capacity(defs.len());
    for root in 0..defs.len() {
        if marks[root] == Mark::Unvisited {
            visit(
                root,
                EdgeKind::Strong,
                &adjacency,
                &names,
                &mut marks,
                &mut stack,
                &mut order,
                &load_bearing,
            )?;
        }
    }
    debug!(order = ?order.iter().map(|&i| names[i].as_str()).collect::<Vec<_>>(), "emission order");

    let mut slots: Vec<Option<ResolvedDef>> = defs.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

#[allow(clippy::too_many_arguments)]
fn visit(
    node: usize,
    entered_by: EdgeKind,
    adjacency: &[Vec<(usize, EdgeKind)>],
    names: &[String],
    marks: &mut [Mark],
    stack: &mut Vec<(usize, EdgeKind)>,
    order: &mut Vec<usize>,
    load_bearing: &impl Fn(EdgeKind) -> bool,
) -> Result<(), EngineError> {
    marks[node] = Mark::InProgress;
    stack.push((node, entered_by));
    for &(dep, kind) in &adjacency[node] {
        match marks[dep] {
            Mark::Done => {}
            Mark::Unvisited => {
                visit(dep, kind, adjacency, names, marks, stack, order, load_bearing)?;
            }
            Mark::InProgress => {
                // Back edge. The cycle runs from `dep` along the stack to
                // `node` and is closed by this edge; its edges are the
                // entering edges of every stack entry after `dep`, plus
                // the closing edge itself.
                let Some(position) = stack.iter().position(|&(member, _)| member == dep) else {
                    continue;
                };
                let segment = &stack[position..];
                let all_load_bearing = load_bearing(kind)
                    && segment[1..].iter().all(|&(_, entered)| load_bearing(entered));
                if all_load_bearing {
                    let members = segment
                        .iter()
                        .map(|&(member, _)| names[member].clone())
                        .collect();
                    return Err(EngineError::unresolvable_cycle(members));
                }
                // At least one edge tolerates a forward declaration: cut
                // the back edge and keep walking the remaining siblings.
                debug!(
                    from = %names[node],
                    to = %names[dep],
                    "cut cycle at forward-declarable edge"
                );
            }
        }
    }
    stack.pop();
    marks[node] = Mark::Done;
    order.push(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{ResolvedField, ResolvedStruct};
    use typeweld_model::Primitive;

    fn strukt(name: &str, fields: &[TypeReference]) -> ResolvedDef {
        ResolvedDef::Struct(ResolvedStruct {
            name: name.to_string(),
            comments: Vec::new(),
            target_tags: Vec::new(),
            fields: fields
                .iter()
                .enumerate()
                .map(|(position, ty)| ResolvedField {
                    ident: format!("field_{position}"),
                    wire: format!("field_{position}"),
                    ty: ty.clone(),
                    comments: Vec::new(),
                    has_default: false,
                    skip: false,
                    target_tags: Vec::new(),
                })
                .collect(),
        })
    }

    fn named(name: &str) -> TypeReference {
        TypeReference::named(name)
    }

    fn order_of(defs: Vec<ResolvedDef>) -> Vec<String> {
        sort_definitions(defs, |kind| kind.is_load_bearing())
            .unwrap()
            .iter()
            .map(|def| def.name().to_string())
            .collect()
    }

    #[test]
    fn test_reference_edges_classification() {
        let ty = TypeReference::mapping(
            TypeReference::Primitive(Primitive::Str),
            TypeReference::optional(TypeReference::sequence(named("Item"))),
        );
        assert_eq!(reference_edges(&ty), vec![("Item".to_string(), EdgeKind::Weak)]);

        let ty = TypeReference::sequence(named("Item"));
        assert_eq!(reference_edges(&ty), vec![("Item".to_string(), EdgeKind::Strong)]);
    }

    #[test]
    fn test_no_edges_keeps_declaration_order() {
        let defs = vec![strukt("B", &[]), strukt("A", &[]), strukt("C", &[])];
        assert_eq!(order_of(defs), ["B", "A", "C"]);
    }

    #[test]
    fn test_dependency_precedes_dependent() {
        let defs = vec![strukt("Outer", &[named("Inner")]), strukt("Inner", &[])];
        assert_eq!(order_of(defs), ["Inner", "Outer"]);
    }

    #[test]
    fn test_weak_cycle_cut_preserves_sibling_walk() {
        // D depends on C strongly and on E weakly; E depends on D
        // strongly. Cutting the weak-closed cycle must not abandon the
        // walk: E still lands before D.
        let defs = vec![
            strukt("A", &[]),
            strukt("B", &[named("A")]),
            strukt("C", &[named("B")]),
            strukt("D", &[named("C"), TypeReference::optional(named("E"))]),
            strukt("E", &[named("D")]),
        ];
        assert_eq!(order_of(defs), ["A", "B", "C", "E", "D"]);
    }

    #[test]
    fn test_all_strong_cycle_is_fatal() {
        let defs = vec![
            strukt("A", &[named("B")]),
            strukt("B", &[named("C")]),
            strukt("C", &[named("A")]),
        ];
        let err = sort_definitions(defs, |kind| kind.is_load_bearing()).unwrap_err();
        match err {
            EngineError::UnresolvableCycle { members } => {
                assert_eq!(members, ["A", "B", "C"]);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_strong_self_reference_is_fatal() {
        let defs = vec![strukt("Node", &[named("Node")])];
        let err = sort_definitions(defs, |kind| kind.is_load_bearing()).unwrap_err();
        assert_eq!(err, EngineError::unresolvable_cycle(vec!["Node".to_string()]));
    }

    #[test]
    fn test_optional_self_reference_is_cut() {
        let defs = vec![strukt("Node", &[TypeReference::optional(named("Node"))])];
        assert_eq!(order_of(defs), ["Node"]);
    }

    #[test]
    fn test_unknown_names_are_not_edges() {
        let defs = vec![strukt("Holder", &[named("External"), named("Also")])];
        assert_eq!(order_of(defs), ["Holder"]);
    }

    #[test]
    fn test_all_edges_load_bearing_escalates_weak_cycle() {
        // With every edge load-bearing, the optional wrapper no longer
        // rescues the cycle.
        let defs = vec![
            strukt("D", &[TypeReference::optional(named("E"))]),
            strukt("E", &[named("D")]),
        ];
        let err = sort_definitions(defs, |_| true).unwrap_err();
        assert!(matches!(err, EngineError::UnresolvableCycle { .. }));
    }
}
