//! Top-level sift configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, CaptureConfig, DatabaseConfig, RetentionConfig, ScoringConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SIFT_*`)
/// 3. Project config (`sift.toml` in project root)
/// 4. User config (`~/.sift/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiftConfig {
    pub database: DatabaseConfig,
    pub analysis: AnalysisConfig,
    pub scoring: ScoringConfig,
    pub capture: CaptureConfig,
    pub retention: RetentionConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_file: Option<String>,
    pub log_window: Option<usize>,
    pub recommendation_limit: Option<usize>,
    pub min_score: Option<f64>,
}

impl SiftConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Parse errors are fatal, unreadable files are not.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join("sift.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SiftConfig) -> Result<(), ConfigError> {
        // Score must strictly increase with frequency.
        if let Some(v) = config.scoring.frequency_weight {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.frequency_weight".to_string(),
                    message: "must be a finite number > 0".to_string(),
                });
            }
        }
        let non_negative = [
            ("scoring.cost_weight", config.scoring.cost_weight),
            ("scoring.composite_factor", config.scoring.composite_factor),
            ("scoring.impact_multiplier", config.scoring.impact_multiplier),
            ("analysis.min_score", config.analysis.min_score),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a finite number >= 0".to_string(),
                    });
                }
            }
        }
        if let Some(cap) = config.scoring.impact_cap {
            if !(0.0..=100.0).contains(&cap) {
                return Err(ConfigError::ValidationFailed {
                    field: "scoring.impact_cap".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if config.analysis.log_window == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.log_window".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, marker) in [
            ("analysis.scan_marker", &config.analysis.scan_marker),
            ("analysis.index_marker", &config.analysis.index_marker),
        ] {
            if matches!(marker.as_deref(), Some("")) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.sift/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".sift").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SiftConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SiftConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut SiftConfig, other: &SiftConfig) {
        fn take<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
            if other.is_some() {
                base.clone_from(other);
            }
        }

        take(&mut base.database.db_file, &other.database.db_file);
        take(&mut base.database.backup_directory, &other.database.backup_directory);

        take(&mut base.analysis.log_window, &other.analysis.log_window);
        take(&mut base.analysis.recommendation_limit, &other.analysis.recommendation_limit);
        take(&mut base.analysis.min_score, &other.analysis.min_score);
        take(&mut base.analysis.scan_marker, &other.analysis.scan_marker);
        take(&mut base.analysis.index_marker, &other.analysis.index_marker);

        take(&mut base.scoring.frequency_weight, &other.scoring.frequency_weight);
        take(&mut base.scoring.cost_weight, &other.scoring.cost_weight);
        take(&mut base.scoring.composite_factor, &other.scoring.composite_factor);
        take(&mut base.scoring.impact_multiplier, &other.scoring.impact_multiplier);
        take(&mut base.scoring.impact_cap, &other.scoring.impact_cap);

        take(&mut base.capture.explain_writes, &other.capture.explain_writes);

        take(&mut base.retention.log_retention_days, &other.retention.log_retention_days);
    }

    /// Apply environment variable overrides.
    /// Pattern: `SIFT_DB_FILE`, `SIFT_ANALYSIS_LOG_WINDOW`, etc.
    fn apply_env_overrides(config: &mut SiftConfig) {
        if let Ok(val) = std::env::var("SIFT_DB_FILE") {
            config.database.db_file = Some(val);
        }
        if let Ok(val) = std::env::var("SIFT_ANALYSIS_LOG_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.log_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SIFT_ANALYSIS_RECOMMENDATION_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.recommendation_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SIFT_ANALYSIS_MIN_SCORE") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.min_score = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SIFT_RETENTION_LOG_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.retention.log_retention_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SIFT_CAPTURE_EXPLAIN_WRITES") {
            if let Ok(v) = val.parse::<bool>() {
                config.capture.explain_writes = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SiftConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_file {
            config.database.db_file = Some(v.clone());
        }
        if let Some(v) = cli.log_window {
            config.analysis.log_window = Some(v);
        }
        if let Some(v) = cli.recommendation_limit {
            config.analysis.recommendation_limit = Some(v);
        }
        if let Some(v) = cli.min_score {
            config.analysis.min_score = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
