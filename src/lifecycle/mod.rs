//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors behind the cart service.
//!
//! 1. **Create** each actor with its client (`cart_actor::new`, `alert_actor::new`).
//! 2. **Run** each actor on its own Tokio task with its context (`()` for both).
//! 3. **Shut down** by dropping every client: each actor's `recv()` returns `None`, the
//!    loop ends, and [`CartSystem::shutdown`] awaits the tasks.
//!
//! Neither actor depends on the other, so there is no start-up order and no cycle to break.
//! [`setup_tracing`] configures log output for the whole process.

pub mod cart_system;
pub mod tracing;

pub use self::cart_system::*;
pub use self::tracing::*;
