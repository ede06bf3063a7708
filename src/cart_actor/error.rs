//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// A note was addressed to a unit the line does not have.
    #[error("Unit {index} out of range for {line} (quantity {quantity})")]
    UnitOutOfRange {
        line: String,
        index: usize,
        quantity: u32,
    },

    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
