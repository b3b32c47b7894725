//! The environment configuration record
//!
//! A flat, immutable record describing the deployment environment: a
//! production flag, the public API server URL, and the settings of the
//! external auth provider used for delegated login. It is constructed once
//! at startup and never mutated; everything else in the service reads it
//! through a shared reference.
//!
//! The serialized shape is fixed and camel-cased (`apiServerUrl`,
//! `auth.clientId`, `auth.callbackUrl`) because external tooling and the
//! web frontend consume the same record.

use barista_common::ConfigurationError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Whether this deployment is a production environment
    pub production: bool,

    /// Public base URL of the API server
    pub api_server_url: String,

    /// Auth provider settings
    pub auth: AuthProviderSettings,
}

/// Settings identifying the external auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProviderSettings {
    /// Provider tenant domain, e.g. "your-tenant.auth0.com"
    pub domain: String,

    /// Audience configured for the API on the provider side
    pub audience: String,

    /// Client id of the registered application
    pub client_id: String,

    /// Base URL the provider redirects back to after login
    pub callback_url: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            production: false,
            api_server_url: "http://127.0.0.1:5000".to_string(),
            auth: AuthProviderSettings::default(),
        }
    }
}

impl Default for AuthProviderSettings {
    fn default() -> Self {
        Self {
            domain: "fsndproject.au.auth0.com".to_string(),
            audience: "homepage".to_string(),
            client_id: "y6j3GsADmb2rOmBXaEN1ElwNbl35uayf".to_string(),
            callback_url: "http://localhost:8100".to_string(),
        }
    }
}

impl Environment {
    /// Validate the record's invariants.
    ///
    /// URLs must be syntactically valid and the auth provider identifiers
    /// non-empty. Called once at startup; a violation aborts boot.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        Url::parse(&self.api_server_url).map_err(|e| ConfigurationError::InvalidValue {
            field: "environment.apiServerUrl".to_string(),
            reason: e.to_string(),
        })?;
        self.auth.validate()
    }
}

impl AuthProviderSettings {
    /// Validate the provider settings.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("environment.auth.domain", &self.domain),
            ("environment.auth.audience", &self.audience),
            ("environment.auth.clientId", &self.client_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigurationError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Url::parse(&self.callback_url).map_err(|e| ConfigurationError::InvalidValue {
            field: "environment.auth.callbackUrl".to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    /// Token issuer expected from this provider.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// URL of the provider's published JSON Web Key Set.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}
