//! # ActorEntity Trait
//!
//! The contract a resource type fulfils to be managed by the generic [`ResourceActor`].
//! It names the key, the payload types and the error type, and provides the async hooks
//! the actor calls while processing requests.
//!
//! [`ResourceActor`]: crate::ResourceActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Keys
/// The actor stores entities in a map keyed by [`ActorEntity::Id`]. The key of a new
/// entity comes from its creation payload via [`ActorEntity::key`]; two payloads that
/// produce the same key address the same resource.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` associated type is
/// handed to every hook and is supplied once, when the actor loop is started.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The natural key for this entity (an owner id, a composite key, ...).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per entity rather than one per action: clients match on a single type,
    /// at the cost of every action nominally being able to return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derives the key under which a newly created entity is stored.
    fn key(params: &Self::Create) -> Self::Id;

    /// Construct the full entity from its key and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Materialises an entity for a key that has no stored value yet.
    ///
    /// Called by the actor when an `Update` or `Action` addresses an unknown key.
    /// Returning `None` (the default) makes such requests fail with `NotFound`.
    fn vivify(_id: &Self::Id) -> Option<Self> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
