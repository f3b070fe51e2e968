//! # Cart Actor
//!
//! The server cart store: one [`Cart`] per authenticated user, held by a generic
//! [`ResourceActor`]. Requests for all carts go through one actor task, so each mutation
//! is complete before the next one is looked at.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`] (mutate, merge)
//!
//! ```rust
//! use b2b_cart::aggregate::CartMutation;
//! use b2b_cart::cart_actor;
//! use b2b_cart::model::CartLineItem;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = cart_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let line = CartLineItem::new("p1", "SKU-1", "Bolt", Decimal::ONE, 2);
//!     let cart = client.mutate("u1".into(), CartMutation::Add(line)).await?;
//!     assert_eq!(cart.count, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::Cart;
use actor_framework::ResourceActor;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, inner) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(inner))
}
