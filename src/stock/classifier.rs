//! # Stock Classifier
//!
//! Turns a stock snapshot and a requested quantity into an [`AdmissionDecision`].
//! Rules are checked top to bottom and the first match wins:
//!
//! | Condition | Decision |
//! |---|---|
//! | `own ≥ requested`, `own > 0` | `available` (own stock) |
//! | `0 < own < requested` | `partial` (own stock, the rest missing) |
//! | `own = 0`, `delivery ≥ requested` | `delivery` (supplier stock) |
//! | `own = 0`, `0 < delivery < requested` | `insufficient` (supplier stock) |
//! | `own = 0`, `delivery = 0` | `unavailable` |
//!
//! A requested quantity of zero or less never reaches the table.

use crate::model::{AdmissionDecision, StockSnapshot};
use crate::stock::StockError;

/// Classifies `requested` units against `snapshot`.
pub fn classify(
    snapshot: &StockSnapshot,
    requested: i64,
) -> Result<AdmissionDecision, StockError> {
    if requested <= 0 {
        return Err(StockError::InvalidQuantity(requested));
    }
    let requested = requested.unsigned_abs();
    let own = u64::from(snapshot.own_stock);
    let delivery = u64::from(snapshot.delivery_stock);

    let decision = if own > 0 && own >= requested {
        AdmissionDecision::Available {
            available_quantity: snapshot.own_stock,
        }
    } else if own > 0 {
        AdmissionDecision::Partial {
            available_quantity: snapshot.own_stock,
            missing_quantity: u32::try_from(requested - own).unwrap_or(u32::MAX),
            delivery_eta_text: snapshot.delivery_eta_text.clone(),
            supplier_name: snapshot.supplier_name.clone(),
        }
    } else if delivery >= requested {
        AdmissionDecision::Delivery {
            delivery_quantity: snapshot.delivery_stock,
            delivery_eta_text: snapshot.delivery_eta_text.clone(),
            supplier_name: snapshot.supplier_name.clone(),
        }
    } else if delivery > 0 {
        AdmissionDecision::Insufficient {
            available_quantity: snapshot.delivery_stock,
        }
    } else {
        AdmissionDecision::Unavailable
    };
    Ok(decision)
}
