//! Error types for the claimsift extraction pipeline

use thiserror::Error;

/// Result type alias for extraction operations
pub type SiftResult<T> = Result<T, SiftError>;

/// Errors that can occur while reviewing a recorded call
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Question table has no '{column}' column")]
    MissingQuestionColumn { column: &'static str },

    #[error("Question in row {row} is empty")]
    EmptyQuestion { row: usize },

    #[error("Questions {first:?} and {second:?} both reduce to key '{key}'")]
    DuplicateQuestionKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Model output does not match the response contract: {0}")]
    MalformedOutput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Question table read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SiftError {
    fn from(err: config::ConfigError) -> Self {
        SiftError::Config(err.to_string())
    }
}
