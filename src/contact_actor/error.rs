//! Error types for the Contact Directory actor.

use thiserror::Error;

/// Errors that can occur during contact directory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContactError {
    /// The number does not have exactly ten digits once normalized.
    #[error("Invalid phone number: expected 10 digits, got {digits}")]
    InvalidNumber { digits: usize },

    /// The requested directory was not found.
    #[error("Directory not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ContactError {
    fn from(msg: String) -> Self {
        ContactError::ActorCommunicationError(msg)
    }
}
