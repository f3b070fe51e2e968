use crate::clients::{AlertClient, CartClient};
use crate::http::AppState;
use crate::stock::CatalogLookup;
use std::sync::Arc;
use tracing::{error, info};

/// Runtime orchestrator for the cart service.
///
/// Owns the cart and alert actors. Both have no dependencies (`Context = ()`), so they are
/// started independently; the catalog is shared with the HTTP layer as-is.
///
/// ```ignore
/// let system = CartSystem::new(32, Arc::new(InMemoryCatalog::new()));
/// let cart = system.cart_client.get_cart("u1".into()).await?;
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    pub cart_client: CartClient,
    pub alert_client: AlertClient,
    pub catalog: Arc<dyn CatalogLookup>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Creates both actors and spawns each on its own task.
    pub fn new(buffer_size: usize, catalog: Arc<dyn CatalogLookup>) -> Self {
        let (cart_actor, cart_client) = crate::cart_actor::new(buffer_size);
        let (alert_actor, alert_client) = crate::alert_actor::new(buffer_size);

        let cart_handle = tokio::spawn(cart_actor.run(()));
        let alert_handle = tokio::spawn(alert_actor.run(()));

        Self {
            cart_client,
            alert_client,
            catalog,
            handles: vec![cart_handle, alert_handle],
        }
    }

    /// Handler state sharing this system's clients.
    pub fn app_state(&self) -> AppState {
        AppState {
            cart: self.cart_client.clone(),
            alerts: self.alert_client.clone(),
            catalog: self.catalog.clone(),
        }
    }

    /// Drops the system's clients and waits for the actors to drain.
    ///
    /// Actors stop once every clone of their client is gone, so clones handed out through
    /// [`app_state`](Self::app_state) must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.alert_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
