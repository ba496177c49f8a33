//! API error type and response envelope.
//!
//! Every response body has the same shape:
//! ```text
//! 200  {"success": true,  "data": {...}}
//! 4xx  {"success": false, "error": "Insufficient stock for Silk Tie. Available: 75"}
//! 500  {"success": false, "error": "Internal server error"}
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crown_core::{CoreError, ValidationError};
use crown_store::StoreError;

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Wraps `data` in a success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Errors surfaced to API clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Anything the client cannot act on. The message is logged, never sent.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InsufficientStock(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(cause) => {
                error!(error = %cause, "Internal error");
                "Internal server error".to_string()
            }
            ApiError::Validation(msg)
            | ApiError::InsufficientStock(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg) => msg,
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock { .. } => ApiError::InsufficientStock(err.to_string()),
            CoreError::ProductNotFound(_) | CoreError::InvoiceNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CoreError::Validation(inner) => inner.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            StoreError::InvalidPatch(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::internal("x").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_insufficient_stock_keeps_message() {
        let err: ApiError = CoreError::InsufficientStock {
            product: "Silk Tie".into(),
            available: 75,
            requested: 80,
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Insufficient stock for Silk Tie. Available: 75");
    }

    #[test]
    fn test_store_errors_map_to_client_errors() {
        let err: ApiError = StoreError::not_found("product", "p9").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = StoreError::already_exists("product", "p1").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = StoreError::Backend("disk full".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 1}));

        let json = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }
}
