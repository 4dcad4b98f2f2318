//! Error types for the emission engine.

use thiserror::Error;

/// Structural failures detected while lowering a compilation unit.
///
/// An [`EngineError::UnresolvableCycle`] aborts the whole unit. The other
/// variants abort only the offending definition; the driver drops it,
/// records the error and keeps emitting the rest of the unit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Two explicit renames on the same item disagree.
    #[error("attribute conflict on '{definition}.{item}': rename '{first}' contradicts '{second}'")]
    AttributeConflict {
        /// Definition owning the item.
        definition: String,
        /// Field or variant carrying the renames.
        item: String,
        /// First explicit rename.
        first: String,
        /// Contradicting explicit rename.
        second: String,
    },

    /// A reference cycle made entirely of load-bearing edges. No
    /// declaration order satisfies it.
    #[error("unresolvable reference cycle: {}", members.join(" -> "))]
    UnresolvableCycle {
        /// Definitions on the cycle, in traversal order.
        members: Vec<String>,
    },

    /// Two variants of one enum resolve to the same wire discriminant,
    /// carrier constant or synthesized declaration name.
    #[error("duplicate discriminant '{discriminant}' in enum '{definition}'")]
    DuplicateDiscriminant {
        /// Enum owning the variants.
        definition: String,
        /// The colliding name or value.
        discriminant: String,
    },
}

impl EngineError {
    /// Creates an [`EngineError::AttributeConflict`].
    pub fn attribute_conflict(
        definition: impl Into<String>,
        item: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::AttributeConflict {
            definition: definition.into(),
            item: item.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an [`EngineError::UnresolvableCycle`].
    #[must_use]
    pub fn unresolvable_cycle(members: Vec<String>) -> Self {
        Self::UnresolvableCycle { members }
    }

    /// Creates an [`EngineError::DuplicateDiscriminant`].
    pub fn duplicate_discriminant(
        definition: impl Into<String>,
        discriminant: impl Into<String>,
    ) -> Self {
        Self::DuplicateDiscriminant {
            definition: definition.into(),
            discriminant: discriminant.into(),
        }
    }

    /// Returns true if the error aborts the whole compilation unit.
    #[must_use]
    pub const fn is_fatal_for_unit(&self) -> bool {
        matches!(self, Self::UnresolvableCycle { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_conflict_message() {
        let err = EngineError::attribute_conflict("Config", "retries", "retry_count", "retries");
        assert_eq!(
            err.to_string(),
            "attribute conflict on 'Config.retries': rename 'retry_count' contradicts 'retries'"
        );
        assert!(!err.is_fatal_for_unit());
    }

    #[test]
    fn test_cycle_message_lists_members() {
        let err = EngineError::unresolvable_cycle(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(err.to_string(), "unresolvable reference cycle: A -> B -> C");
        assert!(err.is_fatal_for_unit());
    }

    #[test]
    fn test_duplicate_discriminant_message() {
        let err = EngineError::duplicate_discriminant("Event", "created");
        assert_eq!(err.to_string(), "duplicate discriminant 'created' in enum 'Event'");
        assert!(!err.is_fatal_for_unit());
    }
}
