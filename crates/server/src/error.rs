//! Unified error handling for the HTTP gateway.
//!
//! Every handler error ends up here. Server-side failures are logged and
//! captured by Sentry; clients only ever see a short generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shopify::ShopifyError;

/// Application-level error type for the scanner gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required request field is missing or blank.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Inventory level query failed.
    #[error("Inventory query failed: {0}")]
    Inventory(#[source] ShopifyError),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shopify(_) | Self::Inventory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Shopify(_) => "Internal error",
            Self::Inventory(_) => "Failed to fetch inventory",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Shopify(_) | Self::Inventory(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Scanner request error"
            );
        }

        // Don't expose internal error details to clients
        let body = Json(json!({ "error": self.public_message() }));

        (self.status(), body).into_response()
    }
}
