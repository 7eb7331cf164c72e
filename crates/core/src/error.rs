//! Error types for factcheck.
//!
//! This module defines a unified error enum that covers all error categories
//! in the workspace: configuration, I/O, LLM transport, request validation,
//! answer generation, prompt rendering and serialization.

use thiserror::Error;

/// Unified error type for factcheck.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Field coercion failures are not represented here: they are recorded
/// inside the extraction result and never propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider transport errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Caller input rejected before any model call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The answer generator failed to produce a completion
    #[error("Generation error: {0}")]
    Generation(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error was raised by request validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
