//! Tests for the sift error handling system.

use sift_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let engine = EngineError::sqlite("no such table: missing");
    assert_eq!(engine.error_code(), "ENGINE_ERROR");

    let storage = StorageError::MigrationFailed {
        version: 1,
        message: "boom".into(),
    };
    assert_eq!(storage.error_code(), "MIGRATION_FAILED");

    let config = ConfigError::FileNotFound { path: "/tmp".into() };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let malformed = ValidationError::MalformedStatement {
        statement: "CREATE INDEX ON t (a)".into(),
    };
    assert_eq!(malformed.error_code(), "MALFORMED_STATEMENT");

    let ambiguity = ParseAmbiguity::MissingFrom;
    assert_eq!(ambiguity.error_code(), "PARSE_AMBIGUITY");
}

#[test]
fn engine_messages_surface_verbatim() {
    let engine = EngineError::sqlite("near \"SELEC\": syntax error");
    assert_eq!(engine.to_string(), "near \"SELEC\": syntax error");

    let capture: CaptureError = engine.clone().into();
    assert_eq!(capture.to_string(), engine.to_string());
    assert_eq!(capture.error_code(), "ENGINE_ERROR");
}

#[test]
fn from_conversions_reach_the_facade_error() {
    let validation = ValidationError::IndexCreation(EngineError::sqlite("index exists"));
    let advisor: AdvisorError = validation.into();
    assert!(matches!(advisor, AdvisorError::Validation(ValidationError::IndexCreation(_))));
    assert_eq!(advisor.error_code(), "INDEX_CREATION_ERROR");

    let advisor: AdvisorError = EngineError::LockPoisoned.into();
    assert_eq!(advisor.error_code(), "SESSION_UNAVAILABLE");
}

#[test]
fn coded_string_prefixes_the_code() {
    let err = ValidationError::QueryExecution(EngineError::sqlite("no such column: x"));
    assert_eq!(
        err.coded_string(),
        "[QUERY_EXECUTION_ERROR] Original query execution failed: no such column: x"
    );
}
