use anyhow::{Context, Result};
use b2b_cart::config::Config;
use b2b_cart::http::AppRouter;
use b2b_cart::lifecycle::{setup_tracing, CartSystem};
use b2b_cart::stock::InMemoryCatalog;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();

    let config = Config::init().context("Failed to load configuration")?;
    info!(?config, "Starting cart service");

    let catalog = match &config.catalog_seed_path {
        Some(path) => InMemoryCatalog::from_seed_file(path)
            .await
            .context("Failed to load catalog seed")?,
        None => {
            warn!("CATALOG_SEED_PATH not set, every stock check will answer unavailable");
            InMemoryCatalog::new()
        }
    };

    let system = CartSystem::new(config.actor_buffer_size, Arc::new(catalog));

    AppRouter::serve(config.port, system.app_state())
        .await
        .context("Failed to start server")?;

    system
        .shutdown()
        .await
        .map_err(anyhow::Error::msg)
        .context("Actors did not shut down cleanly")?;

    info!("Cart service stopped");
    Ok(())
}
