//! Tests for the sift configuration system.

use std::sync::Mutex;

use sift_core::config::{CliOverrides, SiftConfig};
use sift_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SIFT_ env vars and point HOME at an empty directory so the
/// developer's own user config never leaks into a test.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "SIFT_DB_FILE",
        "SIFT_ANALYSIS_LOG_WINDOW",
        "SIFT_ANALYSIS_RECOMMENDATION_LIMIT",
        "SIFT_ANALYSIS_MIN_SCORE",
        "SIFT_RETENTION_LOG_DAYS",
        "SIFT_CAPTURE_EXPLAIN_WRITES",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn defaults_match_documented_weights() {
    let config = SiftConfig::default();
    assert_eq!(config.scoring.effective_frequency_weight(), 0.6);
    assert_eq!(config.scoring.effective_cost_weight(), 4.0);
    assert_eq!(config.scoring.effective_composite_factor(), 0.2);
    assert_eq!(config.scoring.effective_impact_multiplier(), 5.0);
    assert_eq!(config.scoring.effective_impact_cap(), 95.0);
    assert_eq!(config.analysis.effective_recommendation_limit(), 10);
    assert_eq!(config.analysis.effective_log_window(), 100);
    assert_eq!(config.analysis.effective_scan_marker(), "SCAN");
    assert_eq!(config.analysis.effective_index_marker(), "INDEX");
    assert_eq!(config.retention.effective_log_retention_days(), 30);
    assert_eq!(config.database.effective_db_file(), "index_recommendation.db");
    assert!(config.capture.effective_explain_writes());
}

#[test]
fn layered_resolution_cli_over_env_over_project_over_user() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".sift")).unwrap();
    std::fs::write(
        home.path().join(".sift").join("config.toml"),
        "[retention]\nlog_retention_days = 7\n\n[analysis]\nlog_window = 10\n",
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("sift.toml"),
        "[analysis]\nlog_window = 50\nrecommendation_limit = 3\n\n[scoring]\ncost_weight = 2.5\n",
    )
    .unwrap();

    std::env::set_var("SIFT_ANALYSIS_RECOMMENDATION_LIMIT", "4");
    let cli = CliOverrides {
        log_window: Some(200),
        ..Default::default()
    };

    let config = SiftConfig::load(project.path(), Some(&cli)).unwrap();

    assert_eq!(config.retention.log_retention_days, Some(7), "user layer kept");
    assert_eq!(config.scoring.cost_weight, Some(2.5), "project layer kept");
    assert_eq!(config.analysis.recommendation_limit, Some(4), "env beats project");
    assert_eq!(config.analysis.log_window, Some(200), "cli beats everything");

    isolate_env(home.path());
}

#[test]
fn load_without_files_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    let config = SiftConfig::load(project.path(), None).unwrap();
    assert!(config.analysis.log_window.is_none());
    assert_eq!(config.analysis.effective_log_window(), 100);
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    std::fs::write(project.path().join("sift.toml"), "[analysis\nlog_window = ").unwrap();
    let err = SiftConfig::load(project.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let err = SiftConfig::from_toml("[scoring]\nimpact_cap = 150.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scoring.impact_cap"));

    let err = SiftConfig::from_toml("[scoring]\ncost_weight = -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scoring.cost_weight"));

    for weight in ["0.0", "-0.5", "nan"] {
        let err = SiftConfig::from_toml(&format!("[scoring]\nfrequency_weight = {weight}\n")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scoring.frequency_weight"),
            "{weight}: {err}"
        );
    }
    assert!(SiftConfig::from_toml("[scoring]\nfrequency_weight = 0.01\n").is_ok());

    let err = SiftConfig::from_toml("[analysis]\nlog_window = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    let err = SiftConfig::from_toml("[analysis]\nscan_marker = \"\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn unknown_keys_are_ignored() {
    let config = SiftConfig::from_toml("[ui]\ntheme = \"dark\"\n\n[analysis]\nmin_score = 2.0\n").unwrap();
    assert_eq!(config.analysis.effective_min_score(), 2.0);
}

#[test]
fn to_toml_round_trips_overrides() {
    let config = SiftConfig::from_toml(
        "[scoring]\nfrequency_weight = 1.0\nimpact_cap = 80.0\n\n[capture]\nexplain_writes = false\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = SiftConfig::from_toml(&text).unwrap();
    assert_eq!(back.scoring.frequency_weight, Some(1.0));
    assert_eq!(back.scoring.impact_cap, Some(80.0));
    assert_eq!(back.capture.explain_writes, Some(false));
}
