//! # Generic Actor Server
//!
//! The `ResourceActor` owns the store for one entity type and processes requests one at a
//! time, which gives every resource single-writer semantics without locks.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a keyed collection of entities.
///
/// # Concurrency Model
/// The actor owns `store` and the receiving end of the channel. Requests are handled in
/// arrival order and each one runs to completion (hooks included) before the next is
/// read, so two writes to the same key can never interleave.
///
/// # Operations
///
/// * **Create**: derives the key with `T::key`, rejects taken keys with
///   `AlreadyExists`, builds the entity, runs `on_create`, stores it.
/// * **Get**: clones the stored entity, if any.
/// * **Update** / **Action**: looks the entity up, materialising it through
///   `T::vivify` if the key is new, then runs the hook. A materialised entity is only
///   kept if the hook succeeds.
///
/// # Usage
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Cart>::new(32);
/// tokio::spawn(actor.run(()));
/// client.perform_action(owner, CartAction::Mutate(mutation)).await?;
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Cart" rather than "b2b_cart::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::key(&params);

                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some((mut item, vivified)) = self.checkout(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    match item.on_update(update, &context).await {
                        Ok(()) => {
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, vivified, "Updated");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some((mut item, vivified)) = self.checkout(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => {
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, vivified, "Action ok");
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Takes a working copy of the entity stored under `id`, materialising one if the
    /// entity supports it. The copy is written back only when the hook succeeds, so a
    /// failed hook leaves the store untouched.
    fn checkout(&self, id: &T::Id) -> Option<(T, bool)> {
        match self.store.get(id) {
            Some(item) => Some((item.clone(), false)),
            None => T::vivify(id).map(|item| (item, true)),
        }
    }
}
