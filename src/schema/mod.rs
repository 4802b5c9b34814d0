//! Schema module - Configuration types for search runs.

mod config;

pub use config::*;
