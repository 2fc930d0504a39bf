//! Error types used across the engine.

use thiserror::Error;

/// Unified error type for all Provlite operations.
#[derive(Error, Debug)]
pub enum ProvliteError {
    /// Malformed input data (bad attribute value, unparsable id).
    #[error("config error: {0}")]
    Config(String),

    /// A referenced resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation is not valid for the resource's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Storage layer failure.
    #[error("database error: {0}")]
    Database(String),

    /// A process handler or a nested process execution failed.
    #[error("process error: {0}")]
    Process(String),

    /// Unexpected internal condition.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProvliteResult<T> = Result<T, ProvliteError>;
