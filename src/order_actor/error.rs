//! Error types for the Order actor.

use crate::cart_actor::CartError;
use crate::contact_actor::ContactError;
use thiserror::Error;

/// Errors that can occur while submitting or tracking an order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested tracker (or the cart it is bound to) was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The tracker was opened with invalid parameters.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The cart actor failed while the tracker was reading or clearing it.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The contact actor failed while the tracker was reading the selection.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
