//! A product's entry in a cart.
//!
//! Line items carry a snapshot of the catalog fields the cart needs to render, so the
//! cart never has to go back to the catalog to show itself.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use validator::Validate;

/// Type-safe identifier for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product name in the storefront's two locales.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl LocalizedText {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }
}

/// How the quantity of a line will be fulfilled, as decided at admission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockStatus {
    /// Fully covered by own stock.
    #[default]
    InStock,
    /// Partly covered by own stock, the rest backordered.
    Backorder,
    /// Shipped from the supplier after the quoted delivery window.
    Delivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Server record id, assigned when the line is first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_id: ProductId,
    #[validate(length(min = 1, message = "sku must not be empty"))]
    pub sku: String,
    pub name: LocalizedText,
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_unit_price: Option<Decimal>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_eta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
}

impl CartLineItem {
    /// Creates an in-stock line without discount, image or supplier details.
    pub fn new(
        product_id: impl Into<String>,
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id: None,
            product_id: ProductId(product_id.into()),
            sku: sku.into(),
            name: LocalizedText::new(name),
            unit_price,
            discounted_unit_price: None,
            quantity,
            image_ref: None,
            stock_status: StockStatus::InStock,
            delivery_eta_text: None,
            supplier_name: None,
        }
    }

    pub fn with_discount(mut self, discounted_unit_price: Decimal) -> Self {
        self.discounted_unit_price = Some(discounted_unit_price);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// The price one unit is charged at: the discounted price when there is one.
    pub fn effective_unit_price(&self) -> Decimal {
        self.discounted_unit_price.unwrap_or(self.unit_price)
    }

    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }

    /// Whether `reference` names this line, either by product id or by record id.
    pub fn matches(&self, reference: &str) -> bool {
        self.product_id.0 == reference || self.id.as_deref() == Some(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_wins_over_unit_price() {
        let line = CartLineItem::new("p1", "SKU-1", "Bolt", Decimal::new(1000, 2), 3)
            .with_discount(Decimal::new(800, 2));
        assert_eq!(line.effective_unit_price(), Decimal::new(800, 2));
        assert_eq!(line.line_total(), Decimal::new(2400, 2));
    }

    #[test]
    fn test_matches_product_or_record_id() {
        let mut line = CartLineItem::new("p1", "SKU-1", "Bolt", Decimal::ONE, 1);
        assert!(line.matches("p1"));
        assert!(!line.matches("line-7"));
        line.id = Some("line-7".to_string());
        assert!(line.matches("line-7"));
        assert!(!line.matches("p2"));
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let line = CartLineItem::new("p1", "SKU-1", "Bolt", Decimal::new(250, 2), 2);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["stockStatus"], "inStock");
        assert!(json.get("discountedUnitPrice").is_none());
        assert!(json.get("id").is_none());
    }
}
