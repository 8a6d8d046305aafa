//! CLI command implementations.

pub mod synth;
pub mod validate;
