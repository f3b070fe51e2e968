//! # Stock Alert Actor
//!
//! Registry of back-in-stock notification requests, keyed by `(productId, email)`.
//! Registering a key twice is rejected by the actor itself
//! ([`FrameworkError::AlreadyExists`](actor_framework::FrameworkError::AlreadyExists)),
//! which [`AlertClient`] reports as [`AlertError::AlreadyRegistered`].

pub mod entity;
pub mod error;

pub use entity::AlertAction;
pub use error::*;

use crate::clients::AlertClient;
use crate::model::StockAlert;
use actor_framework::ResourceActor;

/// Creates a new StockAlert actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<StockAlert>, AlertClient) {
    let (actor, inner) = ResourceActor::new(buffer_size);
    (actor, AlertClient::new(inner))
}
