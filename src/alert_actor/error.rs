//! Error types for the StockAlert actor.

use actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AlertError {
    /// An alert for this product and email already exists.
    #[error("Alert already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid alert: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for AlertError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::AlreadyExists(key) => AlertError::AlreadyRegistered(key),
            other => match other.entity_error::<AlertError>() {
                Some(inner) => inner.clone(),
                None => AlertError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}
