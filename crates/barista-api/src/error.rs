//! Error types for the Barista API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use barista_common::BaristaError;
use serde_json::json;
use thiserror::Error;

/// Main error type for the Barista API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] barista_common::ConfigurationError),

    /// Missing authentication (no token provided)
    #[error("Authentication required: {message}")]
    MissingAuthentication { message: String },

    /// Authentication error (malformed/expired/invalid token)
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Authorization error (valid token without the required permission)
    #[error("Authorization error: {message}")]
    Authorization { message: String },

    /// Auth provider unreachable or misbehaving
    #[error("Auth provider error: {0}")]
    AuthProvider(#[from] reqwest::Error),

    /// Not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Request was well-formed but semantically unprocessable
    #[error("Unprocessable: {message}")]
    Unprocessable { message: String },

    /// Bad request with message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

impl BaristaError for ApiError {}

impl ApiError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingAuthentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::AuthProvider(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if error is a client error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::MissingAuthentication { .. }
                | ApiError::Authentication { .. }
                | ApiError::Authorization { .. }
                | ApiError::NotFound { .. }
                | ApiError::Unprocessable { .. }
                | ApiError::BadRequest { .. }
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side details stay in the logs; clients get the status phrase
        let message = if status.is_server_error() {
            tracing::error!("request failed: {self}");
            status
                .canonical_reason()
                .unwrap_or("internal server error")
                .to_lowercase()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Error response structure for API documentation
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,

    /// HTTP status code
    pub error: u16,

    /// Human-readable error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingAuthentication {
                message: "test".to_string()
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Authorization {
                message: "test".to_string()
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound {
                resource: "drink 7".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unprocessable {
                message: "test".to_string()
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(ApiError::Authentication {
            message: "test".to_string()
        }
        .is_client_error());
        assert!(ApiError::NotFound {
            resource: "test".to_string()
        }
        .is_client_error());
        assert!(!ApiError::Internal {
            message: "test".to_string()
        }
        .is_client_error());
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = ApiError::NotFound {
            resource: "drink 7".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
        assert!(body["message"].as_str().unwrap().contains("drink 7"));
    }
}
