//! Core types, traits, errors, config, and tracing shared by every sift crate.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
