//! CLI command implementations.

pub mod export;
pub mod serve;
pub mod validate;
