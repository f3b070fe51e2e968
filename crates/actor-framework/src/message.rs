//! # Generic Messages
//!
//! The request envelope exchanged between [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a resource actor.
///
/// The variants are create, read and update plus `Action` for entity-specific operations. All
/// payload types come from the entity's associated types, so a cart payload can never be
/// delivered to the alert actor.
///
/// - **Create**: stores a new entity under `T::key(&params)`; fails if the key is taken.
/// - **Get**: returns a clone of the stored entity, or `None`. Never materialises.
/// - **Update**: applies `T::Update`; materialises via `T::vivify` when the key is unknown.
/// - **Action**: runs `T::Action`; materialises via `T::vivify` when the key is unknown.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
