//! Error types for the Shop actor.

use crate::hours::HoursError;
use thiserror::Error;

/// Errors that can occur during shop operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShopError {
    #[error("Shop not found: {0}")]
    NotFound(String),

    /// The submitted working hours are incomplete or unparsable.
    #[error("Invalid working hours: {0}")]
    InvalidHours(#[from] HoursError),

    #[error("Shop validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ShopError {
    fn from(msg: String) -> Self {
        ShopError::ActorCommunicationError(msg)
    }
}
