use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use tracing::warn;

// 11000 = MongoDB duplicate key
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Maps a driver error from a write, turning unique index collisions into
    /// `ConstraintViolation`.
    pub fn from_write(err: mongodb::error::Error) -> Self {
        let duplicate = matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
        );

        if duplicate {
            warn!("Duplicate key on write: {}", err);
            return AppError::ConstraintViolation("Resource already exists (duplicate entry)".into());
        }
        AppError::Database(err)
    }
}
