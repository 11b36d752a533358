use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Represents data validation errors (e.g., malformed screening submission).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents a statistical model that failed to load or failed at inference.
    ///
    /// This variant never crosses the triage boundary: the cascade recovers it
    /// through the fail-open and default-intent policies.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Represents configuration-related errors (e.g., a broken startup artifact).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents internal invariant violations that indicate a configuration
    /// defect (e.g., a score outside the covered range of a band table).
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(err: validator::ValidationErrors) -> Self {
        EngineError::Validation(format!("Validation errors: {}", err))
    }
}
