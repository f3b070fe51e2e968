//! Stock admission: classifying a requested quantity against current stock.

pub mod catalog;
pub mod classifier;

pub use catalog::*;
pub use classifier::*;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}

/// Failures of the catalog collaborator. Callers degrade these to `unavailable`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Unknown sku: {0}")]
    UnknownSku(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog seed error: {0}")]
    Seed(String),
}
