use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub actor_buffer_size: usize,
    /// JSON file of `sku -> stock snapshot` loaded into the in-memory catalog.
    pub catalog_seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            actor_buffer_size: 32,
            catalog_seed_path: None,
        }
    }
}

impl Config {
    /// Reads `CART_PORT`, `ACTOR_BUFFER_SIZE` and `CATALOG_SEED_PATH`. Unset variables keep
    /// their defaults; set but malformed ones are errors.
    pub fn init() -> Result<Self> {
        let defaults = Self::default();

        let port = match std::env::var("CART_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("CART_PORT must be a valid u16 integer")?,
            Err(_) => defaults.port,
        };

        let actor_buffer_size = match std::env::var("ACTOR_BUFFER_SIZE") {
            Ok(raw) => {
                let size = raw
                    .parse::<usize>()
                    .context("ACTOR_BUFFER_SIZE must be a positive integer")?;
                anyhow::ensure!(size > 0, "ACTOR_BUFFER_SIZE must be a positive integer");
                size
            }
            Err(_) => defaults.actor_buffer_size,
        };

        let catalog_seed_path = std::env::var("CATALOG_SEED_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            port,
            actor_buffer_size,
            catalog_seed_path,
        })
    }
}
