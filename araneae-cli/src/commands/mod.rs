//! CLI command implementations.

pub mod intern;
pub mod resolve;
pub mod stats;
