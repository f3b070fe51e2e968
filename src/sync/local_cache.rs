//! Durable storage for the cart of the current session, independent of authentication.

use crate::model::CartLineItem;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Stable key of the session's local cart. Survives sign-in and sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalCartKey(pub Uuid);

impl LocalCartKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for LocalCartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait LocalCartCache: Send + Sync {
    /// Lines stored under `key`; empty when nothing was stored.
    async fn load(&self, key: &LocalCartKey) -> Result<Vec<CartLineItem>, CacheError>;

    async fn store(&self, key: &LocalCartKey, lines: &[CartLineItem]) -> Result<(), CacheError>;

    /// Forgets `key`. Clearing an absent key succeeds.
    async fn clear(&self, key: &LocalCartKey) -> Result<(), CacheError>;
}

/// Process-local cache, for tests and for hosts without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryCartCache {
    carts: Mutex<HashMap<LocalCartKey, Vec<CartLineItem>>>,
}

impl MemoryCartCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalCartCache for MemoryCartCache {
    async fn load(&self, key: &LocalCartKey) -> Result<Vec<CartLineItem>, CacheError> {
        Ok(self.carts.lock().await.get(key).cloned().unwrap_or_default())
    }

    async fn store(&self, key: &LocalCartKey, lines: &[CartLineItem]) -> Result<(), CacheError> {
        self.carts.lock().await.insert(*key, lines.to_vec());
        Ok(())
    }

    async fn clear(&self, key: &LocalCartKey) -> Result<(), CacheError> {
        self.carts.lock().await.remove(key);
        Ok(())
    }
}

/// One JSON file per local cart under a directory.
#[derive(Debug, Clone)]
pub struct FileCartCache {
    dir: PathBuf,
}

impl FileCartCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &LocalCartKey) -> PathBuf {
        self.dir.join(format!("cart-{key}.json"))
    }
}

#[async_trait]
impl LocalCartCache for FileCartCache {
    async fn load(&self, key: &LocalCartKey) -> Result<Vec<CartLineItem>, CacheError> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, key: &LocalCartKey, lines: &[CartLineItem]) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(lines)?;
        tokio::fs::write(self.path(key), bytes).await?;
        Ok(())
    }

    async fn clear(&self, key: &LocalCartKey) -> Result<(), CacheError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
