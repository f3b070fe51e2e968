//! Stock snapshots read from the catalog and the admission decisions derived from them.
use serde::{Deserialize, Serialize};

/// Current stock for one SKU. Read-only here; owned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    /// Units in the seller's own warehouse.
    pub own_stock: u32,
    /// Units obtainable from the supplier within the delivery window.
    pub delivery_stock: u32,
    #[serde(default)]
    pub delivery_eta_text: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
}

/// The verdict on whether and how a requested quantity may enter the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AdmissionDecision {
    /// Own stock covers the request.
    Available { available_quantity: u32 },
    /// Own stock covers part of the request; the rest is backordered.
    Partial {
        available_quantity: u32,
        missing_quantity: u32,
        delivery_eta_text: Option<String>,
        supplier_name: Option<String>,
    },
    /// No own stock; the supplier covers the request after the delivery window.
    Delivery {
        delivery_quantity: u32,
        delivery_eta_text: Option<String>,
        supplier_name: Option<String>,
    },
    /// No own stock and the supplier cannot cover the request.
    Insufficient { available_quantity: u32 },
    /// Nothing in stock anywhere.
    Unavailable,
}

/// What a refused buyer can do instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Alternative {
    ReduceQuantity { max_quantity: u32 },
    RegisterAlert,
}

impl AdmissionDecision {
    /// Whether the item may enter the cart at all (possibly after confirmation).
    pub fn admits(&self) -> bool {
        matches!(
            self,
            AdmissionDecision::Available { .. }
                | AdmissionDecision::Partial { .. }
                | AdmissionDecision::Delivery { .. }
        )
    }

    /// Whether the buyer has to confirm before anything is added.
    pub fn requires_confirmation(&self) -> bool {
        matches!(
            self,
            AdmissionDecision::Partial { .. } | AdmissionDecision::Delivery { .. }
        )
    }

    /// The actionable alternative offered with a refusal.
    pub fn alternative(&self) -> Option<Alternative> {
        match self {
            AdmissionDecision::Insufficient { available_quantity } => {
                Some(Alternative::ReduceQuantity {
                    max_quantity: *available_quantity,
                })
            }
            AdmissionDecision::Unavailable => Some(Alternative::RegisterAlert),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdmissionDecision::Available { .. } => "available",
            AdmissionDecision::Partial { .. } => "partial",
            AdmissionDecision::Delivery { .. } => "delivery",
            AdmissionDecision::Insufficient { .. } => "insufficient",
            AdmissionDecision::Unavailable => "unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusals_carry_an_alternative() {
        let insufficient = AdmissionDecision::Insufficient {
            available_quantity: 3,
        };
        assert_eq!(
            insufficient.alternative(),
            Some(Alternative::ReduceQuantity { max_quantity: 3 })
        );
        assert_eq!(
            AdmissionDecision::Unavailable.alternative(),
            Some(Alternative::RegisterAlert)
        );
        assert_eq!(
            AdmissionDecision::Available {
                available_quantity: 1
            }
            .alternative(),
            None
        );
    }

    #[test]
    fn test_decision_serializes_with_status_tag() {
        let decision = AdmissionDecision::Partial {
            available_quantity: 2,
            missing_quantity: 3,
            delivery_eta_text: Some("5-7 days".into()),
            supplier_name: None,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["missingQuantity"], 3);
        assert_eq!(json["deliveryEtaText"], "5-7 days");
    }
}
