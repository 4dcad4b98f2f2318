//! Timestamp codec.
//!
//! Wire form is a `Z`-suffixed UTC string. The strict profile accepts
//! exactly the whole-second pattern; the lenient profile tries each pattern
//! in [`LENIENT_PATTERNS`] in order, first match wins. Every encode emits
//! the whole-second pattern, so lenient decode followed by encode drops
//! sub-second precision.

use crate::error::CodecError;
use crate::registry::{ScalarCodec, ScalarValue};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use typeweld_model::ScalarKind;

/// Pattern accepted by the strict profile and produced by every encode.
pub const WHOLE_SECOND_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Patterns the lenient profile tries, in priority order.
pub const LENIENT_PATTERNS: [&str; 2] = [WHOLE_SECOND_PATTERN, "%Y-%m-%dT%H:%M:%S%.fZ"];

/// Decode profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampProfile {
    /// Accepts exactly [`WHOLE_SECOND_PATTERN`].
    Strict,
    /// Tries each of [`LENIENT_PATTERNS`] in order.
    #[default]
    Lenient,
}

fn parse_with(field: &str, value: &Value, patterns: &[&str]) -> Result<DateTime<Utc>, CodecError> {
    let Some(text) = value.as_str() else {
        return Err(CodecError::invalid_shape(field, "a UTC timestamp string"));
    };
    for pattern in patterns {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Ok(naive.and_utc());
        }
    }
    Err(CodecError::unparseable_timestamp(field, text))
}

/// Decodes a wire value with the strict profile.
pub fn decode_strict(field: &str, value: &Value) -> Result<DateTime<Utc>, CodecError> {
    parse_with(field, value, &[WHOLE_SECOND_PATTERN])
}

/// Decodes a wire value with the lenient profile.
pub fn decode_lenient(field: &str, value: &Value) -> Result<DateTime<Utc>, CodecError> {
    parse_with(field, value, &LENIENT_PATTERNS)
}

/// Encodes a timestamp into its wire form, always whole-second.
#[must_use]
pub fn encode(timestamp: &DateTime<Utc>) -> Value {
    Value::String(timestamp.format(WHOLE_SECOND_PATTERN).to_string())
}

/// Timestamp codec registered under [`ScalarKind::Timestamp`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampCodec {
    /// Decode profile.
    pub profile: TimestampProfile,
}

impl TimestampCodec {
    /// Creates a codec with the strict profile.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            profile: TimestampProfile::Strict,
        }
    }

    /// Creates a codec with the lenient profile.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            profile: TimestampProfile::Lenient,
        }
    }
}

impl ScalarCodec for TimestampCodec {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Timestamp
    }

    fn decode(&self, field: &str, value: &Value) -> Result<ScalarValue, CodecError> {
        let decoded = match self.profile {
            TimestampProfile::Strict => decode_strict(field, value)?,
            TimestampProfile::Lenient => decode_lenient(field, value)?,
        };
        Ok(ScalarValue::Timestamp(decoded))
    }
}
