//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).

pub mod alert_client;
pub mod cart_client;

pub use alert_client::*;
pub use cart_client::*;
