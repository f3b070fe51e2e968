use crate::aggregate::CartMutation;
use crate::cart_actor::CartError;
use crate::http::extract::format_validation_errors;
use crate::http::{AppState, AuthenticatedUser, HttpError, JsonBody};
use crate::model::{CartLineItem, ProductId};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CartActionKind {
    Add,
    Update,
    Remove,
    Clear,
}

/// Body of `POST /api/cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub action: CartActionKind,
    pub item: Option<CartLineItem>,
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
}

impl CartRequest {
    fn into_mutation(self) -> Result<CartMutation, HttpError> {
        let mutation = match self.action {
            CartActionKind::Add => {
                let item = self
                    .item
                    .ok_or_else(|| CartError::MissingItem("item is required".into()))?;
                if item.quantity == 0 {
                    return Err(CartError::InvalidQuantity(0).into());
                }
                item.validate()
                    .map_err(|e| HttpError::BadRequest(format_validation_errors(&e)))?;
                CartMutation::Add(item)
            }
            CartActionKind::Update => {
                let product_id = required_product(self.product_id)?;
                let quantity = self
                    .quantity
                    .ok_or_else(|| CartError::MissingItem("quantity is required".into()))?;
                CartMutation::quantity_update(product_id, quantity)?
            }
            CartActionKind::Remove => CartMutation::remove(required_product(self.product_id)?.0),
            CartActionKind::Clear => CartMutation::Clear,
        };
        Ok(mutation)
    }
}

fn required_product(product_id: Option<String>) -> Result<ProductId, CartError> {
    product_id
        .filter(|p| !p.is_empty())
        .map(ProductId)
        .ok_or_else(|| CartError::MissingItem("productId is required".into()))
}

/// Body of `PUT /api/cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    pub local_cart: Vec<CartLineItem>,
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, HttpError> {
    let cart = state.cart.get_cart(user).await?;
    Ok((StatusCode::OK, Json(cart)))
}

#[instrument(skip(state, request), fields(action = ?request.action))]
pub async fn update_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(request): JsonBody<CartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mutation = request.into_mutation()?;
    let cart = state.cart.mutate(user, mutation).await?;
    Ok((StatusCode::OK, Json(cart)))
}

#[instrument(skip(state, request), fields(lines = request.local_cart.len()))]
pub async fn merge_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(request): JsonBody<MergeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let cart = state.cart.merge(user, request.local_cart).await?;
    Ok((StatusCode::OK, Json(cart)))
}
