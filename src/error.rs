// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every handler and controller catches failures at its own boundary and
/// re-signals as one of these variants; an already-classified `ApiError`
/// passes through unchanged (no double-wrapping).
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed payload, wrong upload content type)
    Validation(String),

    // 401 Unauthorized (missing/invalid/expired token)
    Unauthorized(String),

    // 404 Not Found (row absent, or owned by a different identity)
    NotFound(String),

    // 500 Internal Server Error (store returned no rows on insert/update)
    Storage(String),

    // 500 Internal Server Error (any other remote-call failure, passed through)
    Unknown(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Storage(msg)
            | ApiError::Unknown(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": "error",
            "detail": self.detail(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::Storage(message.into())
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AuthRejected(msg) => ApiError::unauthorized(msg),
            StoreError::Provider { status, message } => {
                tracing::error!("store provider error ({}): {}", status, message);
                ApiError::unknown(message)
            }
            StoreError::Http(e) => {
                tracing::error!("store request failed: {}", e);
                ApiError::unknown(format!("Remote call failed: {}", e))
            }
            StoreError::BadResponse(msg) => {
                tracing::error!("unexpected store response: {}", msg);
                ApiError::unknown(msg)
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid payload: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::storage("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::unknown("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_carries_detail() {
        let body = ApiError::not_found("Job not found").to_json();
        assert_eq!(body["status"], "error");
        assert_eq!(body["detail"], "Job not found");
    }

    #[test]
    fn auth_rejection_maps_to_401() {
        let err: ApiError = StoreError::AuthRejected("Invalid token".into()).into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
