//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Carts are keyed by their owner. An update or action addressed to a user without a cart
//! finds an empty one, so the first mutation creates the cart. Reads never do.

use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartLineItem, CartSummary, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use uuid::Uuid;

impl Cart {
    /// Gives a record id to every line persisted for the first time.
    fn assign_record_ids(&mut self) {
        for line in self.items_mut().iter_mut().filter(|l| l.id.is_none()) {
            line.id = Some(Uuid::new_v4().to_string());
        }
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    /// Replaces every line.
    type Update = Vec<CartLineItem>;
    type Action = CartAction;
    type ActionResult = CartSummary;
    type Context = ();
    type Error = CartError;

    fn key(params: &CartCreate) -> UserId {
        params.owner.clone()
    }

    fn from_create_params(owner: UserId, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(owner))
    }

    fn vivify(owner: &UserId) -> Option<Self> {
        Some(Cart::new(owner.clone()))
    }

    async fn on_update(&mut self, lines: Vec<CartLineItem>, _ctx: &()) -> Result<(), CartError> {
        self.replace(lines)?;
        self.assign_record_ids();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &(),
    ) -> Result<CartSummary, CartError> {
        match action {
            CartAction::Mutate(mutation) => self.apply(mutation)?,
            CartAction::Merge(local) => self.merge_local(local)?,
        }
        self.assign_record_ids();
        Ok(self.summary())
    }
}
