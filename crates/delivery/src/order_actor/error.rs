//! Error types for the Order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The customer placing the order does not exist.
    #[error("Invalid customer: {0}")]
    InvalidCustomer(String),

    /// The shop the order is placed at does not exist.
    #[error("Invalid shop: {0}")]
    InvalidShop(String),

    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The order is not in a state that allows the requested change.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
