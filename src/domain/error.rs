//! Failure taxonomy of the link registry and code generator.

use thiserror::Error;

/// Errors produced by link creation, lookup and storage.
///
/// Storage adapters translate driver errors into this type so the service
/// layer never sees database-specific failures. A uniqueness violation on
/// insert is always reported as [`LinkError::DuplicateCode`].
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    #[error("Invalid short code: {0}")]
    InvalidCode(String),

    #[error("Short code '{0}' already exists")]
    DuplicateCode(String),

    #[error("URL already shortened to /{code}")]
    DuplicateUrl { code: String },

    #[error("Short link '{0}' not found")]
    NotFound(String),

    #[error("Failed to generate a free short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for LinkError {
    fn from(err: sqlx::Error) -> Self {
        LinkError::Storage(err.to_string())
    }
}
