use crate::http::{AppState, AuthenticatedUser, HttpError, JsonBody, SimpleValidatedJson};
use crate::model::{AdmissionDecision, Alternative, StockAlertCreate};
use crate::stock::check_stock;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockCheckRequest {
    #[validate(length(min = 1, message = "sku is required"))]
    pub sku: String,
    pub quantity: i64,
}

/// The decision plus what the storefront should do with it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCheckResponse {
    #[serde(flatten)]
    pub decision: AdmissionDecision,
    pub requires_confirmation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<Alternative>,
}

impl From<AdmissionDecision> for StockCheckResponse {
    fn from(decision: AdmissionDecision) -> Self {
        Self {
            requires_confirmation: decision.requires_confirmation(),
            alternative: decision.alternative(),
            decision,
        }
    }
}

#[instrument(skip(state))]
pub async fn stock_check(
    State(state): State<AppState>,
    SimpleValidatedJson(request): SimpleValidatedJson<StockCheckRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let decision = check_stock(state.catalog.as_ref(), &request.sku, request.quantity).await?;
    Ok((StatusCode::OK, Json(StockCheckResponse::from(decision))))
}

/// Registration validates inside [`AlertClient::register`](crate::clients::AlertClient::register),
/// after the email is normalized.
#[instrument(skip(state, request), fields(%user, product_id = %request.product_id))]
pub async fn register_alert(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(request): JsonBody<StockAlertCreate>,
) -> Result<impl IntoResponse, HttpError> {
    let alert = state.alerts.register(request).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
