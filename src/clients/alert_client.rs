use crate::alert_actor::AlertError;
use crate::model::{AlertKey, StockAlert, StockAlertCreate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};
use validator::Validate;

/// Client for interacting with the StockAlert actor.
#[derive(Clone)]
pub struct AlertClient {
    inner: ResourceClient<StockAlert>,
}

impl AlertClient {
    pub fn new(inner: ResourceClient<StockAlert>) -> Self {
        Self { inner }
    }

    /// Registers an alert and returns it as stored.
    ///
    /// Fails with [`AlertError::AlreadyRegistered`] when the product already has an alert
    /// for this email, in any letter case.
    #[instrument(skip(self, params), fields(product_id = %params.product_id))]
    pub async fn register(&self, params: StockAlertCreate) -> Result<StockAlert, AlertError> {
        let params = params.normalized();
        params
            .validate()
            .map_err(|e| AlertError::ValidationError(e.to_string()))?;
        debug!("Sending request");

        let key = self.inner.create(params).await?;
        self.inner.get(key.clone()).await?.ok_or_else(|| {
            AlertError::ActorCommunicationError(format!("alert {key} missing after registration"))
        })
    }

    #[instrument(skip(self))]
    pub async fn find(&self, key: AlertKey) -> Result<Option<StockAlert>, AlertError> {
        self.get(key).await
    }
}

#[async_trait]
impl ActorClient<StockAlert> for AlertClient {
    type Error = AlertError;

    fn inner(&self) -> &ResourceClient<StockAlert> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        AlertError::from(e)
    }
}
