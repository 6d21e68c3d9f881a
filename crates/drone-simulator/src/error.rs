//! Simulator error types.

use drone_domain::DomainError;
use thiserror::Error;

/// Simulator errors.
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// Rejected planning parameter or malformed input
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scenario could not be assembled
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, SimulatorError>;
