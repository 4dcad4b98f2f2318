//! # TypeWeld Codec
//!
//! Reference codecs for scalar kinds without a native JSON representation.
//!
//! This crate provides:
//! - Byte-sequence codec (wire form: array of 0-255 integers)
//! - Timestamp codec with strict and lenient decode profiles
//! - A registry value threaded through the engine entry point
//! - Codec error types

pub mod bytes;
pub mod error;
pub mod registry;
pub mod timestamp;

pub use bytes::ByteSequenceCodec;
pub use error::CodecError;
pub use registry::{ScalarCodec, ScalarCodecRegistry, ScalarValue};
pub use timestamp::{TimestampCodec, TimestampProfile, LENIENT_PATTERNS, WHOLE_SECOND_PATTERN};
