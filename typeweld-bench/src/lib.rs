//! # TypeWeld Bench
//!
//! Benchmarking utilities for TypeWeld performance testing.

pub mod fixtures;
