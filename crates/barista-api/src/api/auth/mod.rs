//! Bearer authentication for protected routes
//!
//! Handlers that need a caller identity take an [`AuthContext`] extractor:
//! it parses the `Authorization` header, verifies the token against the
//! auth provider settings of the environment record, and carries the
//! caller's RBAC permissions for per-route checks.

pub mod jwt_validator;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ApiError, Result},
    server::AppState,
};

/// Authenticated caller context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Subject of the verified token
    pub user_id: String,

    /// Permissions granted to the caller
    pub permissions: Vec<String>,
}

impl AuthContext {
    /// Check whether the caller holds a specific permission.
    pub fn has_permission(&self, required: &str) -> bool {
        self.permissions.iter().any(|p| p == required)
    }

    /// Require a permission, rejecting the request when it is absent.
    pub fn require_permission(&self, required: &str) -> Result<()> {
        if self.has_permission(required) {
            Ok(())
        } else {
            Err(ApiError::Authorization {
                message: format!("permission '{required}' is not granted"),
            })
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::MissingAuthentication {
            message: "authorization header is expected".to_string(),
        })?
        .to_str()
        .map_err(|_| ApiError::Authentication {
            message: "authorization header is not valid UTF-8".to_string(),
        })?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().ok_or_else(|| ApiError::Authentication {
        message: "authorization header is empty".to_string(),
    })?;
    let token = parts.next().ok_or_else(|| ApiError::Authentication {
        message: "token not found in authorization header".to_string(),
    })?;

    if parts.next().is_some() {
        return Err(ApiError::Authentication {
            message: "authorization header must be 'Bearer <token>'".to_string(),
        });
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Authentication {
            message: "authorization header must use the Bearer scheme".to_string(),
        });
    }

    Ok(token)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = extract_bearer_token(&parts.headers)?.to_owned();

        let settings = &state.config.environment.auth;
        let claims = jwt_validator::verify_bearer_token(&token, settings).await?;

        debug!(
            "authenticated {} with permissions {:?}",
            claims.sub, claims.permissions
        );

        Ok(AuthContext {
            user_id: claims.sub,
            permissions: claims.permissions,
        })
    }
}
