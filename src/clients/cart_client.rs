//! # Cart Client
//!
//! High-level API for the cart store. Wraps a `ResourceClient<Cart>` and answers every
//! call with the cart's [`CartSummary`].
use crate::aggregate::CartMutation;
use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartLineItem, CartSummary, UserId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Reads the owner's cart. A user without a stored cart gets the empty shape.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, owner: UserId) -> Result<CartSummary, CartError> {
        debug!("Sending request");
        let cart = self.inner.get(owner).await?;
        Ok(cart.map(|c| c.summary()).unwrap_or_default())
    }

    /// Applies one mutation, creating the cart if this is the user's first.
    #[instrument(skip(self, mutation), fields(kind = mutation.label()))]
    pub async fn mutate(
        &self,
        owner: UserId,
        mutation: CartMutation,
    ) -> Result<CartSummary, CartError> {
        debug!(?mutation, "Sending request");
        Ok(self
            .inner
            .perform_action(owner, CartAction::Mutate(mutation))
            .await?)
    }

    /// Merges `local` into the stored cart in a single request.
    #[instrument(skip(self, local), fields(lines = local.len()))]
    pub async fn merge(
        &self,
        owner: UserId,
        local: Vec<CartLineItem>,
    ) -> Result<CartSummary, CartError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(owner, CartAction::Merge(local))
            .await?)
    }

    /// Overwrites every stored line with `lines`.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn replace(
        &self,
        owner: UserId,
        lines: Vec<CartLineItem>,
    ) -> Result<CartSummary, CartError> {
        debug!("Sending request");
        let cart = self.inner.update(owner, lines).await?;
        Ok(cart.summary())
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};
    use rust_decimal::Decimal;

    fn line(product: &str, qty: u32) -> CartLineItem {
        CartLineItem::new(product, "SKU", product, Decimal::TEN, qty)
    }

    #[tokio::test]
    async fn test_get_cart_without_cart_is_empty_shape() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get("u1".into()).return_ok(None);

        let client = CartClient::new(mock.client());
        let summary = client.get_cart("u1".into()).await.unwrap();

        assert_eq!(summary, CartSummary::default());
        mock.verify();
    }

    #[tokio::test]
    async fn test_mutate_sends_mutation_as_action() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move {
            client
                .mutate("u1".into(), CartMutation::remove("p1"))
                .await
        });

        let (owner, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(owner, UserId::from("u1"));
        assert!(matches!(
            action,
            CartAction::Mutate(CartMutation::Remove { ref reference }) if reference == "p1"
        ));
        responder.send(Ok(CartSummary::default())).unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_entity_rejection_keeps_its_type() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action("u1".into())
            .return_err(FrameworkError::EntityError(Box::new(
                CartError::LineNotFound("p9".into()),
            )));

        let client = CartClient::new(mock.client());
        let err = client
            .mutate("u1".into(), CartMutation::quantity_update("p9".into(), 2).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err, CartError::LineNotFound("p9".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_replace_returns_summary_of_updated_cart() {
        let mut stored = Cart::new("u1".into());
        stored.replace(vec![line("p1", 2)]).unwrap();

        let mut mock = MockClient::<Cart>::new();
        mock.expect_update("u1".into()).return_ok(stored);

        let client = CartClient::new(mock.client());
        let summary = client
            .replace("u1".into(), vec![line("p1", 2)])
            .await
            .unwrap();

        assert_eq!(summary.total, Decimal::from(20));
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_communication_error() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action("u1".into())
            .return_err(FrameworkError::ActorClosed);

        let client = CartClient::new(mock.client());
        let err = client.merge("u1".into(), vec![]).await.unwrap_err();
        assert!(matches!(err, CartError::ActorCommunicationError(_)));
    }
}
