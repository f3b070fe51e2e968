//! # Cart Sync Engine
//!
//! The client-side owner of a session's cart. It admits items against live stock, keeps
//! the lines durable in a [`LocalCartCache`], mirrors every change to the cart store while
//! the user is signed in, and merges the anonymous cart into the stored one on sign-in.
//!
//! ## Ordering
//!
//! Every method takes `&mut self`, and local state is updated before any remote call is
//! started. Mirror calls run in the background and may overlap; whichever write the store
//! processes last wins. [`CartSyncEngine::settle`] waits for all of them.
//!
//! ## Sign-in
//!
//! ```text
//! anonymous ──SignedIn──► fetch stored cart ─► merge (max rule) ─► replace stored cart
//!     ▲                                                               │
//!     │ failure: stay anonymous, keep local cache                     ▼
//!     └──────────────────────── SignedOut ◄────────────── authenticated, cache cleared
//! ```

use crate::aggregate::{self, CartMutation};
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::model::{
    AdmissionDecision, AuthEvent, CartLineItem, CartSummary, Identity, ProductId, StockStatus,
    UserId,
};
use crate::stock::{check_stock, CatalogLookup};
use crate::sync::{CacheError, LocalCartCache, LocalCartKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// Result of asking to add an item.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The line was applied.
    Added(AdmissionDecision),
    /// Nothing was applied; the buyer must confirm the delayed delivery first.
    NeedsConfirmation(AdmissionDecision),
    /// Nothing was applied. The decision carries the alternative to offer.
    Refused(AdmissionDecision),
}

/// An add waiting for the buyer's confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAdd {
    pub item: CartLineItem,
    pub decision: AdmissionDecision,
}

pub struct CartSyncEngine {
    lines: Vec<CartLineItem>,
    identity: Identity,
    local_key: LocalCartKey,
    pending: Option<PendingAdd>,
    remote: CartClient,
    catalog: Arc<dyn CatalogLookup>,
    cache: Arc<dyn LocalCartCache>,
    in_flight: Arc<AtomicUsize>,
    mirrors: JoinSet<()>,
}

impl CartSyncEngine {
    /// Creates an anonymous engine with an empty cart. Call [`restore`](Self::restore) to
    /// pick up lines cached by an earlier session under the same key.
    pub fn new(
        local_key: LocalCartKey,
        remote: CartClient,
        catalog: Arc<dyn CatalogLookup>,
        cache: Arc<dyn LocalCartCache>,
    ) -> Self {
        Self {
            lines: Vec::new(),
            identity: Identity::Anonymous(local_key.0),
            local_key,
            pending: None,
            remote,
            catalog,
            cache,
            in_flight: Arc::new(AtomicUsize::new(0)),
            mirrors: JoinSet::new(),
        }
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(self.lines.clone())
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_authenticated()
    }

    /// Whether mirror calls are outstanding. Advisory only.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn pending(&self) -> Option<&PendingAdd> {
        self.pending.as_ref()
    }

    /// Replaces the in-memory lines with those cached under the local key.
    pub async fn restore(&mut self) -> Result<usize, CacheError> {
        self.lines = self.cache.load(&self.local_key).await?;
        debug!(key = %self.local_key, lines = self.lines.len(), "Restored local cart");
        Ok(self.lines.len())
    }

    /// Asks to add `item`, classifying its quantity against fresh stock.
    ///
    /// Only an `available` decision applies the line right away. `partial` and `delivery`
    /// park it until [`confirm_pending`](Self::confirm_pending); anything else leaves the
    /// cart untouched.
    #[instrument(skip(self, item), fields(product_id = %item.product_id, quantity = item.quantity))]
    pub async fn add(&mut self, item: CartLineItem) -> Result<AddOutcome, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        let decision =
            check_stock(self.catalog.as_ref(), &item.sku, i64::from(item.quantity)).await?;

        if decision.requires_confirmation() {
            debug!(decision = decision.label(), "Awaiting confirmation");
            self.pending = Some(PendingAdd {
                item: annotate(item, &decision),
                decision: decision.clone(),
            });
            return Ok(AddOutcome::NeedsConfirmation(decision));
        }
        if !decision.admits() {
            debug!(decision = decision.label(), "Refused");
            return Ok(AddOutcome::Refused(decision));
        }

        self.commit(CartMutation::Add(annotate(item, &decision)))
            .await?;
        Ok(AddOutcome::Added(decision))
    }

    /// Applies the parked add exactly as it was classified. `None` when nothing is parked.
    pub async fn confirm_pending(&mut self) -> Result<Option<CartSummary>, CartError> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        let summary = self.commit(CartMutation::Add(pending.item)).await?;
        Ok(Some(summary))
    }

    pub fn cancel_pending(&mut self) -> Option<PendingAdd> {
        self.pending.take()
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub async fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartSummary, CartError> {
        self.commit(CartMutation::quantity_update(product_id, quantity)?)
            .await
    }

    /// Removes the line named by product id or record id.
    pub async fn remove(&mut self, reference: &str) -> Result<CartSummary, CartError> {
        self.commit(CartMutation::remove(reference)).await
    }

    pub async fn clear(&mut self) -> Result<CartSummary, CartError> {
        self.commit(CartMutation::Clear).await
    }

    /// Reacts to a change reported by the authentication layer.
    pub async fn handle_auth(&mut self, event: AuthEvent) -> Result<(), CartError> {
        match event {
            AuthEvent::SignedIn(user) => self.sign_in(user).await,
            AuthEvent::SignedOut => {
                self.settle().await;
                self.identity = Identity::Anonymous(self.local_key.0);
                info!(key = %self.local_key, "Signed out, local cart kept");
                Ok(())
            }
        }
    }

    /// Waits for every outstanding mirror call to finish.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.mirrors.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Mirror task failed");
            }
        }
    }

    #[instrument(skip(self))]
    async fn sign_in(&mut self, user: UserId) -> Result<(), CartError> {
        if self.is_authenticated() {
            debug!("Already signed in");
            return Ok(());
        }

        let stored = match self.remote.get_cart(user.clone()).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Fetching stored cart failed, keeping local cart");
                return Err(e);
            }
        };
        // Lines cached by an earlier session under this key count as local, even if
        // `restore` was never called.
        let (local, cache_read) = match self.cache.load(&self.local_key).await {
            Ok(cached) => (aggregate::merge(&cached, &self.lines), true),
            Err(e) => {
                warn!(error = %e, "Reading local cart failed, merging in-memory lines only");
                (self.lines.clone(), false)
            }
        };
        let merged = aggregate::merge(&stored.items, &local);
        let persisted = match self.remote.replace(user.clone(), merged).await {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(error = %e, "Writing merged cart failed, keeping local cart");
                return Err(e);
            }
        };

        // An unreadable cache may still hold lines that never reached the store.
        if cache_read {
            if let Err(e) = self.cache.clear(&self.local_key).await {
                warn!(error = %e, "Clearing local cart failed");
            }
        }
        info!(
            local = local.len(),
            stored = stored.count,
            merged = persisted.count,
            "Merged local cart into stored cart"
        );
        self.lines = persisted.items;
        self.identity = Identity::User(user);
        Ok(())
    }

    /// Applies `mutation` locally, persists it and, when signed in, mirrors it.
    async fn commit(&mut self, mutation: CartMutation) -> Result<CartSummary, CartError> {
        aggregate::apply(&mut self.lines, mutation.clone())?;

        if let Err(e) = self.cache.store(&self.local_key, &self.lines).await {
            warn!(error = %e, "Writing local cart failed");
        }
        if let Some(user) = self.identity.user().cloned() {
            self.mirror(user, mutation);
        }
        Ok(self.summary())
    }

    fn mirror(&mut self, owner: UserId, mutation: CartMutation) {
        while self.mirrors.try_join_next().is_some() {}

        let remote = self.remote.clone();
        let in_flight = self.in_flight.clone();
        in_flight.fetch_add(1, Ordering::SeqCst);
        self.mirrors.spawn(async move {
            let kind = mutation.label();
            if let Err(e) = remote.mutate(owner.clone(), mutation).await {
                warn!(%owner, mutation = kind, error = %e, "Mirroring to stored cart failed");
            }
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

/// Records on the line how its quantity will be fulfilled.
fn annotate(mut item: CartLineItem, decision: &AdmissionDecision) -> CartLineItem {
    match decision {
        AdmissionDecision::Partial {
            delivery_eta_text,
            supplier_name,
            ..
        } => {
            item.stock_status = StockStatus::Backorder;
            item.delivery_eta_text = delivery_eta_text.clone();
            item.supplier_name = supplier_name.clone();
        }
        AdmissionDecision::Delivery {
            delivery_eta_text,
            supplier_name,
            ..
        } => {
            item.stock_status = StockStatus::Delivery;
            item.delivery_eta_text = delivery_eta_text.clone();
            item.supplier_name = supplier_name.clone();
        }
        _ => item.stock_status = StockStatus::InStock,
    }
    item
}
