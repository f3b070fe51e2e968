//! Plain data types shared by the actors, the sync engine and the HTTP layer.
//!
//! [`Cart`] and [`StockAlert`] implement [`ActorEntity`](actor_framework::ActorEntity)
//! (see [`cart_actor`](crate::cart_actor) and [`alert_actor`](crate::alert_actor)).

pub mod alert;
pub mod cart;
pub mod identity;
pub mod line_item;
pub mod stock;

pub use alert::*;
pub use cart::*;
pub use identity::*;
pub use line_item::*;
pub use stock::*;
