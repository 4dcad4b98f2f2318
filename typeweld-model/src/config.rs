//! Engine configuration supplied by the IR producer.

use crate::rename::CaseConvention;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration for one emission run.
///
/// Deserializable so producers can load it from a config file; every field
/// has a default, so an empty document yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Platform tag to filter for. `None` retains only universal items.
    pub requested_platform: Option<String>,
    /// Wire key carrying the variant discriminant.
    pub discriminant_key: String,
    /// Wire key carrying the variant payload.
    pub payload_key: String,
    /// Convention applied when a container declares no `rename-all`.
    pub default_case: CaseConvention,
    /// Reserved words of the target language. A resolved identifier that
    /// collides gains a trailing underscore; the wire name never changes.
    pub reserved_words: BTreeSet<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            requested_platform: None,
            discriminant_key: "type".to_string(),
            payload_key: "content".to_string(),
            default_case: CaseConvention::Passthrough,
            reserved_words: BTreeSet::new(),
        }
    }
}

impl EngineConfig {
    /// Returns true if `ident` is reserved in the target language.
    #[must_use]
    pub fn is_reserved(&self, ident: &str) -> bool {
        self.reserved_words.contains(ident)
    }

    /// Returns the requested platform tag, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.requested_platform.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wire_keys() {
        let config = EngineConfig::default();
        assert_eq!(config.discriminant_key, "type");
        assert_eq!(config.payload_key, "content");
        assert_eq!(config.default_case, CaseConvention::Passthrough);
        assert!(config.requested_platform.is_none());
        assert!(config.reserved_words.is_empty());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"requested_platform": "ios"}"#).unwrap();
        assert_eq!(config.platform(), Some("ios"));
        assert_eq!(config.discriminant_key, "type");
        assert_eq!(config.payload_key, "content");
    }

    #[test]
    fn test_case_convention_from_document() {
        let config: EngineConfig = serde_json::from_str(r#"{"default_case": "camel"}"#).unwrap();
        assert_eq!(config.default_case, CaseConvention::Camel);
    }

    #[test]
    fn test_is_reserved() {
        let mut config = EngineConfig::default();
        config.reserved_words.insert("and".to_string());
        assert!(config.is_reserved("and"));
        assert!(!config.is_reserved("also"));
    }
}
