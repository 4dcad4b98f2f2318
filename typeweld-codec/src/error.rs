//! Error types for scalar codec decode operations.

use thiserror::Error;

/// Error type for scalar codec decode operations.
///
/// These are runtime behaviors of decode paths, never generation-time
/// failures. Messages name the offending field and the expected shape so
/// callers can locate the bad wire value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Byte array element outside 0-255 or not an integer.
    #[error("field '{field}': element at index {index} must be an integer in 0-255, got {value}")]
    OutOfRangeByte {
        /// Field owning the wire value.
        field: String,
        /// Index of the offending element.
        index: usize,
        /// Offending element, JSON-rendered.
        value: String,
    },

    /// Wire value has the wrong JSON shape.
    #[error("field '{field}': invalid wire shape, expected {expected}")]
    InvalidShape {
        /// Field owning the wire value.
        field: String,
        /// Description of the expected shape.
        expected: String,
    },

    /// Timestamp string matched none of the accepted patterns.
    #[error("field '{field}': cannot parse timestamp '{value}'")]
    UnparseableTimestamp {
        /// Field owning the wire value.
        field: String,
        /// The unparseable input.
        value: String,
    },
}

impl CodecError {
    /// Creates an out-of-range byte error.
    pub fn out_of_range_byte(
        field: impl Into<String>,
        index: usize,
        value: impl Into<String>,
    ) -> Self {
        Self::OutOfRangeByte {
            field: field.into(),
            index,
            value: value.into(),
        }
    }

    /// Creates an invalid wire shape error.
    pub fn invalid_shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Creates an unparseable timestamp error.
    pub fn unparseable_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnparseableTimestamp {
            field: field.into(),
            value: value.into(),
        }
    }
}
