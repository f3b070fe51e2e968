use crate::model::{LocalizedText, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::Validate;

/// A standing request to be notified when a product is back in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: ProductId,
    pub sku: String,
    pub name: LocalizedText,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl StockAlert {
    pub fn key(&self) -> AlertKey {
        AlertKey {
            product_id: self.product_id.clone(),
            email: self.email.clone(),
        }
    }
}

/// At most one alert exists per `(product, email)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub product_id: ProductId,
    pub email: String,
}

impl AlertKey {
    /// Builds a key, lowercasing the email the same way registration does.
    pub fn new(product_id: ProductId, email: &str) -> Self {
        Self {
            product_id,
            email: normalize_email(email),
        }
    }
}

impl Display for AlertKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.product_id, self.email)
    }
}

/// Registration payload, as posted to `/api/stock-alerts`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockAlertCreate {
    #[validate(length(min = 1, message = "productId is required"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "sku is required"))]
    pub sku: String,
    pub name: LocalizedText,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl StockAlertCreate {
    /// The key this registration will be stored under.
    pub fn key(&self) -> AlertKey {
        AlertKey::new(ProductId(self.product_id.clone()), &self.email)
    }

    /// Trims and lowercases the email. Validation runs on the normalized form.
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
