use thiserror::Error;

use super::status::UnknownStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot {action} when status is {from}")]
    InvalidTransition { from: &'static str, action: &'static str },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UnknownStatus> for DomainError {
    fn from(e: UnknownStatus) -> Self {
        DomainError::Internal(e.to_string())
    }
}
