//! Parameter resolution: defaults, config file, and flags merged into one validated set.

pub mod color;
pub mod error;
pub mod resolve;
