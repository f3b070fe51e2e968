use crate::aggregate::{self, CartMutation};
use crate::cart_actor::CartError;
use crate::model::{CartLineItem, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The server-side cart of one authenticated user.
///
/// `total` and `items_count` are derived from the lines and recomputed after every change;
/// there is no way to set them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    owner: UserId,
    items: Vec<CartLineItem>,
    total: Decimal,
    items_count: usize,
}

impl Cart {
    /// An empty cart. Emptied carts look exactly like this; they are never removed.
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            items: Vec::new(),
            total: Decimal::ZERO,
            items_count: 0,
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn items_count(&self) -> usize {
        self.items_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies one mutation and refreshes the derived fields.
    pub fn apply(&mut self, mutation: CartMutation) -> Result<(), CartError> {
        aggregate::apply(&mut self.items, mutation)?;
        self.recompute();
        Ok(())
    }

    /// Replaces every line in one step.
    ///
    /// Lines must have a positive quantity. Repeated products collapse into one line.
    pub fn replace(&mut self, items: Vec<CartLineItem>) -> Result<(), CartError> {
        if let Some(bad) = items.iter().find(|l| l.quantity == 0) {
            return Err(CartError::InvalidLine(format!(
                "{}: quantity must be at least 1",
                bad.product_id
            )));
        }
        self.items = aggregate::merge(&[], &items);
        self.recompute();
        Ok(())
    }

    /// Merges `local` into the stored lines with the max-quantity rule.
    pub fn merge_local(&mut self, local: Vec<CartLineItem>) -> Result<(), CartError> {
        let merged = aggregate::merge(&self.items, &local);
        self.replace(merged)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [CartLineItem] {
        &mut self.items
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items.clone(),
            total: self.total,
            count: self.items_count,
        }
    }

    fn recompute(&mut self) {
        self.total = aggregate::cart_total(&self.items);
        self.items_count = aggregate::items_count(&self.items);
    }
}

/// Payload for creating a cart explicitly. Carts are usually created on first mutation.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub owner: UserId,
}

/// The cart as returned to callers: `{ items, total, count }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLineItem>,
    pub total: Decimal,
    pub count: usize,
}

impl CartSummary {
    /// Builds a summary for lines that are not held by a [`Cart`], such as a local preview.
    pub fn of(items: Vec<CartLineItem>) -> Self {
        Self {
            total: aggregate::cart_total(&items),
            count: aggregate::items_count(&items),
            items,
        }
    }
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        cart.summary()
    }
}
