use crate::alert_actor::AlertError;
use crate::cart_actor::CartError;
use crate::stock::StockError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<CartError> for HttpError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::LineNotFound(_) => HttpError::NotFound(err.to_string()),
            CartError::ActorCommunicationError(msg) => HttpError::Internal(msg),
            other => HttpError::BadRequest(other.to_string()),
        }
    }
}

impl From<AlertError> for HttpError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::AlreadyRegistered(_) => HttpError::Conflict(err.to_string()),
            AlertError::ValidationError(msg) => HttpError::BadRequest(msg),
            AlertError::ActorCommunicationError(msg) => HttpError::Internal(msg),
        }
    }
}

impl From<StockError> for HttpError {
    fn from(err: StockError) -> Self {
        HttpError::BadRequest(err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}
