//! Our custom error type.

use thiserror::Error;

pub type TangoResult<T> = Result<T, TangoError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TangoError {
    /// The backend could not be reached or rejected the request.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    /// A record the operation relies on does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// A required field was empty. Raised before anything is sent to the backend.
    #[error("Invalid input: {0}")]
    ValidationFailure(&'static str),
    /// Durable local storage cannot be accessed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Locked, authenticate first")]
    Locked,
}

impl TangoError {
    pub fn network(err: impl ToString) -> Self {
        Self::NetworkFailure(err.to_string())
    }

    pub fn storage(err: impl ToString) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for TangoError {
    fn from(value: serde_json::Error) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}

impl From<std::io::Error> for TangoError {
    fn from(value: std::io::Error) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}
