//! Configuration system for sift.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod capture_config;
pub mod database_config;
pub mod retention_config;
pub mod scoring_config;
pub mod sift_config;

pub use analysis_config::AnalysisConfig;
pub use capture_config::CaptureConfig;
pub use database_config::DatabaseConfig;
pub use retention_config::RetentionConfig;
pub use scoring_config::ScoringConfig;
pub use sift_config::{CliOverrides, SiftConfig};
