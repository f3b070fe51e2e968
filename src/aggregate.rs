//! # Cart Aggregate
//!
//! Pure functions over a cart's line items. Every place that mutates lines or computes a
//! total goes through this module: the server [`Cart`](crate::model::Cart) entity, the
//! merge on authentication and the client-side preview in the
//! [`CartSyncEngine`](crate::sync::CartSyncEngine).
//!
//! ## Add sums, merge takes the max
//!
//! Adding a product that is already in the cart **adds** the quantities: the buyer asked
//! for more. Merging an anonymous cart into a stored one takes the **maximum** of the two
//! quantities: both carts may describe the same intent from different devices, and summing
//! would double count.
//!
//! ```rust
//! use b2b_cart::aggregate::{apply, merge, CartMutation};
//! use b2b_cart::model::CartLineItem;
//! use rust_decimal::Decimal;
//!
//! let bolt = |qty| CartLineItem::new("p1", "SKU-1", "Bolt", Decimal::ONE, qty);
//!
//! let mut lines = Vec::new();
//! apply(&mut lines, CartMutation::Add(bolt(2))).unwrap();
//! apply(&mut lines, CartMutation::Add(bolt(3))).unwrap();
//! assert_eq!(lines[0].quantity, 5);
//!
//! let merged = merge(&[bolt(1)], &[bolt(3)]);
//! assert_eq!(merged[0].quantity, 3);
//! ```

use crate::cart_actor::CartError;
use crate::model::{CartLineItem, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// A change to a cart's lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CartMutation {
    /// Adds the line, summing quantities with an existing line for the same product.
    Add(CartLineItem),
    /// Replaces the quantity of the line for `product_id`.
    SetQuantity {
        product_id: ProductId,
        quantity: NonZeroU32,
    },
    /// Removes the line named by product id or line record id.
    Remove { reference: String },
    /// Empties the cart.
    Clear,
}

impl CartMutation {
    /// Translates a requested quantity into the mutation it stands for.
    ///
    /// A quantity of zero or less means "remove the line"; this is the only place that
    /// rule is encoded, and both the HTTP handler and the sync engine build quantity
    /// updates through it. A quantity that does not fit a `u32` is an
    /// [`InvalidQuantity`](CartError::InvalidQuantity).
    pub fn quantity_update(product_id: ProductId, quantity: i64) -> Result<Self, CartError> {
        if quantity <= 0 {
            return Ok(CartMutation::Remove {
                reference: product_id.0,
            });
        }
        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(CartError::InvalidQuantity(quantity))?;
        Ok(CartMutation::SetQuantity {
            product_id,
            quantity,
        })
    }

    pub fn remove(reference: impl Into<String>) -> Self {
        CartMutation::Remove {
            reference: reference.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CartMutation::Add(_) => "add",
            CartMutation::SetQuantity { .. } => "update",
            CartMutation::Remove { .. } => "remove",
            CartMutation::Clear => "clear",
        }
    }
}

/// Applies `mutation` to `lines` in place.
///
/// Lines keep their insertion order; at most one line exists per product. Removing a line
/// that is not there is a no-op, so removal is idempotent.
pub fn apply(lines: &mut Vec<CartLineItem>, mutation: CartMutation) -> Result<(), CartError> {
    match mutation {
        CartMutation::Add(item) => {
            if item.quantity == 0 {
                return Err(CartError::InvalidQuantity(0));
            }
            match lines.iter_mut().find(|l| l.product_id == item.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => lines.push(item),
            }
        }
        CartMutation::SetQuantity {
            product_id,
            quantity,
        } => {
            let line = lines
                .iter_mut()
                .find(|l| l.matches(&product_id.0))
                .ok_or_else(|| CartError::LineNotFound(product_id.0.clone()))?;
            line.quantity = quantity.get();
        }
        CartMutation::Remove { reference } => {
            lines.retain(|l| !l.matches(&reference));
        }
        CartMutation::Clear => lines.clear(),
    }
    Ok(())
}

/// Merges an anonymous cart into a stored one.
///
/// Stored lines keep their position and record ids. A local line for a product already
/// present raises that line to `max(local, stored)`; any other local line is appended
/// unchanged.
pub fn merge(remote: &[CartLineItem], local: &[CartLineItem]) -> Vec<CartLineItem> {
    let mut merged = remote.to_vec();
    for line in local {
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.max(line.quantity),
            None => merged.push(line.clone()),
        }
    }
    merged
}

/// Σ quantity × (discounted price, else unit price).
pub fn cart_total(lines: &[CartLineItem]) -> Decimal {
    lines.iter().map(CartLineItem::line_total).sum()
}

/// Number of distinct lines (not the sum of quantities).
pub fn items_count(lines: &[CartLineItem]) -> usize {
    lines.len()
}
