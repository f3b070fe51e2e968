use crate::aggregate::CartMutation;
use crate::model::CartLineItem;

/// Custom actions for the Cart resource.
///
/// Every action answers with the cart's [`CartSummary`](crate::model::CartSummary) after
/// the change, so there is a single result type to match on.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Applies one add, update, remove or clear.
    Mutate(CartMutation),
    /// Merges an anonymous cart into the stored one, atomically.
    Merge(Vec<CartLineItem>),
}
