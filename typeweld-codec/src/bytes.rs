//! Byte-sequence codec.
//!
//! Wire form is an array of integers in 0-255. A JSON string is accepted on
//! decode as an already-correct byte sequence. Encode never fails and
//! produces one integer per byte in original order.

use crate::error::CodecError;
use crate::registry::{ScalarCodec, ScalarValue};
use serde_json::Value;
use typeweld_model::ScalarKind;

/// Decodes a wire value into a byte sequence.
///
/// `field` names the owning field for error reporting.
pub fn decode(field: &str, value: &Value) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::Array(items) => {
            let mut bytes = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let byte = item
                    .as_i64()
                    .filter(|v| (0..=255).contains(v))
                    .ok_or_else(|| {
                        CodecError::out_of_range_byte(field, index, item.to_string())
                    })?;
                bytes.push(byte as u8);
            }
            Ok(bytes)
        }
        Value::String(text) => Ok(text.clone().into_bytes()),
        _ => Err(CodecError::invalid_shape(
            field,
            "an array of integers in 0-255 or a byte string",
        )),
    }
}

/// Encodes a byte sequence into its wire form.
#[must_use]
pub fn encode(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|&b| Value::from(b)).collect())
}

/// Byte-sequence codec registered under [`ScalarKind::Bytes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSequenceCodec;

impl ScalarCodec for ByteSequenceCodec {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bytes
    }

    fn decode(&self, field: &str, value: &Value) -> Result<ScalarValue, CodecError> {
        decode(field, value).map(ScalarValue::Bytes)
    }
}
