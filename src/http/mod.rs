//! # HTTP Surface
//!
//! JSON endpoints over the cart store, the stock classifier and the alert registry.
//!
//! | Route | Handler | Identity |
//! |---|---|---|
//! | `GET /api/cart` | [`get_cart`] | required |
//! | `POST /api/cart` | [`update_cart`] | required |
//! | `PUT /api/cart` | [`merge_cart`] | required |
//! | `POST /api/stock-check` | [`stock_check`] | - |
//! | `POST /api/stock-alerts` | [`register_alert`] | required |
//! | `GET /health` | [`health`] | - |

pub mod cart;
pub mod error;
pub mod extract;
pub mod stock;

pub use cart::*;
pub use error::*;
pub use extract::*;
pub use stock::*;

use crate::clients::{AlertClient, CartClient};
use crate::stock::CatalogLookup;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Everything a handler may reach.
#[derive(Clone)]
pub struct AppState {
    pub cart: CartClient,
    pub alerts: AlertClient,
    pub catalog: Arc<dyn CatalogLookup>,
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(state: AppState) -> Router {
        Router::new()
            .route("/api/cart", get(get_cart).post(update_cart).put(merge_cart))
            .route("/api/stock-check", post(stock_check))
            .route("/api/stock-alerts", post(register_alert))
            .route("/health", get(health))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serves until Ctrl-C.
    pub async fn serve(port: u16, state: AppState) -> Result<()> {
        let app = Self::build(state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;
        info!(addr = %listener.local_addr()?, "Listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
