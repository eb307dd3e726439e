//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stock_insight_payoff::PayoffError;

/// Error responses rendered as `{ "error": "..." }` JSON bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Request was syntactically valid but semantically rejected.
    Unprocessable(String),
    /// Malformed request input, e.g. an invalid ticker.
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Unprocessable(msg) | Self::BadRequest(msg) => msg,
        }
    }
}

impl From<PayoffError> for ApiError {
    fn from(err: PayoffError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}
