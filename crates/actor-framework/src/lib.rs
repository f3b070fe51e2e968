//! # Actor Framework
//!
//! Building blocks for keyed, resource-oriented actors on top of Tokio.
//!
//! Every resource type (a cart, a stock alert, ...) is owned by exactly one
//! [`ResourceActor`] running on its own task. Callers never touch the state directly:
//! they send CRUD + Action requests through a cloneable [`ResourceClient`] and receive
//! the result on a oneshot channel.
//!
//! ## Keyed Resources
//!
//! Resources are addressed by a natural key rather than a generated counter. The key is
//! derived from the creation payload ([`ActorEntity::key`]), so creating a resource whose
//! key already exists is rejected with [`FrameworkError::AlreadyExists`]. This is how the
//! stock-alert registry refuses a second alert for the same `(product, email)` pair.
//!
//! Some resources come into existence implicitly, on the first write addressed to them.
//! An entity opts into this through [`ActorEntity::vivify`]; the actor then materialises
//! the entity before applying an `Update` or `Action` to a key it has never seen. Reads
//! never materialise anything.
//!
//! ## Layers
//!
//! 1. **Entity layer** ([`ActorEntity`]): the domain type and its hooks.
//! 2. **Runtime layer** ([`ResourceActor`]): the sequential message loop and the store.
//! 3. **Interface layer** ([`ResourceClient`], [`ActorClient`]): typed request helpers.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Tally { name: String, hits: u32 }
//!
//! #[derive(Debug)] struct TallyCreate { name: String }
//! #[derive(Debug)] struct TallyUpdate;
//! #[derive(Debug)] enum TallyAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("tally error")] struct TallyError;
//!
//! #[async_trait]
//! impl ActorEntity for Tally {
//!     type Id = String;
//!     type Create = TallyCreate;
//!     type Update = TallyUpdate;
//!     type Action = TallyAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = TallyError;
//!
//!     fn key(params: &TallyCreate) -> String { params.name.clone() }
//!
//!     fn from_create_params(id: String, _: TallyCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { name: id, hits: 0 })
//!     }
//!
//!     fn vivify(id: &String) -> Option<Self> {
//!         Some(Self { name: id.clone(), hits: 0 })
//!     }
//!
//!     async fn on_update(&mut self, _: TallyUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!
//!     async fn handle_action(&mut self, action: TallyAction, _: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             TallyAction::Hit => { self.hits += 1; Ok(self.hits) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Tally>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     // No create needed: the first action materialises the tally.
//!     let hits = client.perform_action("home".to_string(), TallyAction::Hit).await.unwrap();
//!     assert_eq!(hits, 1);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Requests to one actor are processed **sequentially**, so a write is fully applied
//!   before the next request is observed. The store needs no locks.
//! - Different actors run in parallel.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations instead of a real
//! store, which keeps client-side orchestration tests deterministic.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
