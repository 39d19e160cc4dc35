//! Error types for confsched.

use thiserror::Error;

/// Errors that can occur in confsched operations.
#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Email not found: {0}")]
    EmailNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConfError {
    /// Whether the error points at a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfError::EventNotFound(_) | ConfError::FileNotFound(_) | ConfError::EmailNotFound(_)
        )
    }

    /// Whether the error was caused by bad client input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ConfError::InvalidDate(_) | ConfError::Validation(_) | ConfError::DuplicateEmail
        )
    }
}

impl From<serde_json::Error> for ConfError {
    fn from(err: serde_json::Error) -> Self {
        ConfError::Serialization(err.to_string())
    }
}

/// Result type alias for confsched operations.
pub type ConfResult<T> = Result<T, ConfError>;
