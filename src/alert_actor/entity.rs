use crate::alert_actor::AlertError;
use crate::model::{AlertKey, ProductId, StockAlert, StockAlertCreate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

/// Alerts have no custom operations; they are registered and read back.
#[derive(Debug)]
pub enum AlertAction {}

#[async_trait]
impl ActorEntity for StockAlert {
    type Id = AlertKey;
    type Create = StockAlertCreate;
    type Update = ();
    type Action = AlertAction;
    type ActionResult = ();
    type Context = ();
    type Error = AlertError;

    fn key(params: &StockAlertCreate) -> AlertKey {
        params.key()
    }

    fn from_create_params(_key: AlertKey, params: StockAlertCreate) -> Result<Self, AlertError> {
        let params = params.normalized();
        params
            .validate()
            .map_err(|e| AlertError::ValidationError(e.to_string()))?;
        Ok(StockAlert {
            product_id: ProductId(params.product_id),
            sku: params.sku,
            name: params.name,
            email: params.email,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), AlertError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: AlertAction, _ctx: &()) -> Result<(), AlertError> {
        match action {}
    }
}
