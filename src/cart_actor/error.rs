//! Error types for the Cart actor.

use crate::stock::StockError;
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// A quantity below 1 was given where a positive quantity is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// An add request carried no line item.
    #[error("Missing item: {0}")]
    MissingItem(String),

    /// A line failed validation.
    #[error("Invalid line: {0}")]
    InvalidLine(String),

    /// A quantity update addressed a product that is not in the cart.
    #[error("Line not found: {0}")]
    LineNotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    /// Recovers the cart's own error when the actor rejected the request, otherwise
    /// reports a communication failure.
    fn from(e: FrameworkError) -> Self {
        match e.entity_error::<CartError>() {
            Some(inner) => inner.clone(),
            None => CartError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl From<StockError> for CartError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::InvalidQuantity(q) => CartError::InvalidQuantity(q),
        }
    }
}

impl CartError {
    /// Whether the request itself was at fault, as opposed to the cart store.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, CartError::ActorCommunicationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_is_unwrapped() {
        let boxed = FrameworkError::EntityError(Box::new(CartError::InvalidQuantity(0)));
        assert_eq!(CartError::from(boxed), CartError::InvalidQuantity(0));
    }

    #[test]
    fn test_plumbing_error_becomes_communication_error() {
        let err = CartError::from(FrameworkError::ActorClosed);
        assert!(matches!(err, CartError::ActorCommunicationError(_)));
        assert!(!err.is_invalid_input());
    }
}
