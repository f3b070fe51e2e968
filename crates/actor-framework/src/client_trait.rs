//! # ActorClient Trait
//!
//! Shared surface for domain-specific client wrappers: implementors supply the inner
//! [`ResourceClient`] and an error mapping, and inherit `get`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read operation.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<StockAlert> for AlertClient {
///     type Error = AlertError;
///     fn inner(&self) -> &ResourceClient<StockAlert> { &self.inner }
///     fn map_error(e: FrameworkError) -> AlertError { AlertError::from(e) }
/// }
///
/// let alert = alert_client.get(key).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }
}
