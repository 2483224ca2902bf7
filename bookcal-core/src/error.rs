//! Error types for the bookcal ecosystem.

use thiserror::Error;

/// Errors that can occur in bookcal operations.
#[derive(Error, Debug)]
pub enum BookcalError {
    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),
}

/// Result type alias for bookcal operations.
pub type BookcalResult<T> = Result<T, BookcalError>;
