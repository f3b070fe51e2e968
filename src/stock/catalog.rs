//! The catalog as seen from the cart: a source of stock snapshots.

use crate::model::{AdmissionDecision, StockSnapshot};
use crate::stock::{classify, CatalogError, StockError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Read access to current stock levels. Implemented by whatever owns the catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn stock_for(&self, sku: &str) -> Result<StockSnapshot, CatalogError>;
}

/// A catalog held in memory, optionally seeded from a JSON file of `sku -> snapshot`.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    stock: RwLock<HashMap<String, StockSnapshot>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, StockSnapshot)>,
        S: Into<String>,
    {
        Self {
            stock: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Loads a catalog from a JSON object keyed by SKU.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Seed(format!("{}: {e}", path.display())))?;
        let entries: HashMap<String, StockSnapshot> = serde_json::from_str(&raw)
            .map_err(|e| CatalogError::Seed(format!("{}: {e}", path.display())))?;
        debug!(skus = entries.len(), "Catalog seeded");
        Ok(Self::with_stock(entries))
    }

    pub async fn set_stock(&self, sku: impl Into<String>, snapshot: StockSnapshot) {
        self.stock.write().await.insert(sku.into(), snapshot);
    }

    pub async fn len(&self) -> usize {
        self.stock.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.stock.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn stock_for(&self, sku: &str) -> Result<StockSnapshot, CatalogError> {
        self.stock
            .read()
            .await
            .get(sku)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSku(sku.to_string()))
    }
}

/// Reads fresh stock for `sku` and classifies `quantity` against it.
///
/// A catalog that cannot answer yields `unavailable`: nothing is admitted on a guess.
#[instrument(skip(catalog))]
pub async fn check_stock(
    catalog: &dyn CatalogLookup,
    sku: &str,
    quantity: i64,
) -> Result<AdmissionDecision, StockError> {
    if quantity <= 0 {
        return Err(StockError::InvalidQuantity(quantity));
    }
    match catalog.stock_for(sku).await {
        Ok(snapshot) => {
            let decision = classify(&snapshot, quantity)?;
            debug!(decision = decision.label(), "Classified");
            Ok(decision)
        }
        Err(e) => {
            warn!(error = %e, "Stock lookup failed, treating as unavailable");
            Ok(AdmissionDecision::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct DownCatalog;

    #[async_trait]
    impl CatalogLookup for DownCatalog {
        async fn stock_for(&self, _sku: &str) -> Result<StockSnapshot, CatalogError> {
            Err(CatalogError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_unavailable() {
        let decision = check_stock(&DownCatalog, "SKU-1", 2).await.unwrap();
        assert_eq!(decision, AdmissionDecision::Unavailable);

        let decision = check_stock(&InMemoryCatalog::new(), "SKU-missing", 2)
            .await
            .unwrap();
        assert_eq!(decision, AdmissionDecision::Unavailable);
    }

    #[tokio::test]
    async fn test_invalid_quantity_is_not_degraded() {
        let err = check_stock(&DownCatalog, "SKU-1", 0).await.unwrap_err();
        assert_eq!(err, StockError::InvalidQuantity(0));
    }

    #[tokio::test]
    async fn test_reads_current_stock_each_time() {
        let catalog = InMemoryCatalog::with_stock([(
            "SKU-1",
            StockSnapshot {
                own_stock: 1,
                ..Default::default()
            },
        )]);
        assert_eq!(check_stock(&catalog, "SKU-1", 1).await.unwrap().label(), "available");

        catalog.set_stock("SKU-1", StockSnapshot::default()).await;
        assert_eq!(check_stock(&catalog, "SKU-1", 1).await.unwrap().label(), "unavailable");
    }

    #[tokio::test]
    async fn test_seed_file_loads_snapshots() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"SKU-1": {{"ownStock": 4, "deliveryStock": 10, "deliveryEtaText": "3 days"}}}}"#
        )
        .unwrap();

        let catalog = InMemoryCatalog::from_seed_file(file.path()).await.unwrap();
        let snapshot = catalog.stock_for("SKU-1").await.unwrap();
        assert_eq!(snapshot.own_stock, 4);
        assert_eq!(snapshot.delivery_eta_text.as_deref(), Some("3 days"));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_bad_seed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            InMemoryCatalog::from_seed_file(file.path()).await,
            Err(CatalogError::Seed(_))
        ));
    }
}
