//! Unified diff decoding.

pub mod parser;
