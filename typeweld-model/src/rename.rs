//! Case conventions and identifier conversion helpers.
//!
//! The convention conversions split on underscore boundaries only; an
//! already-camelCased identifier is not re-segmented. Carrier constant
//! naming uses [`to_screaming_snake_case`], which does re-segment.

use serde::{Deserialize, Serialize};

/// Case convention applied to a container's identifiers when resolving
/// wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseConvention {
    /// `another_list` becomes `anotherList`.
    Camel,
    /// `another_list` becomes `another-list`.
    Kebab,
    /// `another_list` becomes `AnotherList`.
    Pascal,
    /// Identifier unchanged.
    #[default]
    Passthrough,
}

impl CaseConvention {
    /// Parses a convention from its schema annotation value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "camelCase" | "camel" => Some(Self::Camel),
            "kebab-case" | "kebab" => Some(Self::Kebab),
            "PascalCase" | "pascal" => Some(Self::Pascal),
            "passthrough" => Some(Self::Passthrough),
            _ => None,
        }
    }

    /// Applies the convention to an underscore-delimited identifier.
    #[must_use]
    pub fn apply(&self, ident: &str) -> String {
        match self {
            Self::Camel => to_camel_case(ident),
            Self::Kebab => to_kebab_case(ident),
            Self::Pascal => to_pascal_case(ident),
            Self::Passthrough => ident.to_string(),
        }
    }
}

/// Uppercases the first letter of every underscore-delimited word and
/// removes the separators.
#[must_use]
pub fn to_pascal_case(ident: &str) -> String {
    ident
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Like [`to_pascal_case`] but the first word keeps a lowercase initial.
#[must_use]
pub fn to_camel_case(ident: &str) -> String {
    let pascal = to_pascal_case(ident);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => pascal,
    }
}

/// Lowercases the identifier and joins underscore-delimited words with `-`.
#[must_use]
pub fn to_kebab_case(ident: &str) -> String {
    ident
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Converts a name to SCREAMING_SNAKE_CASE.
///
/// Unlike the convention conversions, this re-segments camelCase and
/// PascalCase input: boundaries are inserted at lower-to-upper transitions,
/// letter-digit transitions, and before the last uppercase of a run that is
/// followed by a lowercase letter.
#[must_use]
pub fn to_screaming_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        let boundary = i > 0 && {
            let prev = chars[i - 1];
            (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_numeric() && c.is_alphabetic())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_lowercase()))
        };
        if boundary && !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
        out.extend(c.to_uppercase());
    }
    out
}
