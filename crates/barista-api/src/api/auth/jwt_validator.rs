//! JWT validation against the auth provider's JWKS
//!
//! Bearer tokens are RS256-signed by the external auth provider. The
//! provider publishes its public keys as a JSON Web Key Set; validation
//! fetches that set (cached with a TTL), picks the key named by the token
//! header's `kid`, and checks signature, expiry, audience, and issuer.

use crate::config::AuthProviderSettings;
use crate::error::{ApiError, Result};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// JSON Web Key Set structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Find a key by its key id.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// JSON Web Key structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: Option<String>,
    pub alg: Option<String>,
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    pub n: Option<String>,
    pub e: Option<String>,
    #[serde(flatten)]
    pub other: HashMap<String, Value>,
}

/// Global JWKS cache with TTL support, keyed by JWKS URL
static JWKS_CACHE: Lazy<Cache<String, Arc<JwkSet>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(16)
        .build()
});

/// JWT claims validated by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Audience (intended recipient of the token); string or array
    pub aud: Value,
    /// Issuer (who issued the token)
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: Option<u64>,
    /// RBAC grants carried by the token
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Custom claims
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

/// Decode a token header and return its key id.
///
/// Pure and cheap; callers use it to reject malformed tokens before
/// touching the network.
pub fn decode_header_kid(token: &str) -> Result<String> {
    let header = decode_header(token).map_err(|e| ApiError::Authentication {
        message: format!("malformed token header: {e}"),
    })?;

    header.kid.ok_or_else(|| ApiError::Authentication {
        message: "token header is missing a key id".to_string(),
    })
}

/// Fetch the provider's JWKS, consulting the TTL cache first.
pub async fn fetch_jwks(settings: &AuthProviderSettings) -> Result<Arc<JwkSet>> {
    let jwks_url = settings.jwks_url();

    if let Some(cached) = JWKS_CACHE.get(&jwks_url).await {
        debug!("using cached JWKS for {jwks_url}");
        return Ok(cached);
    }

    debug!("fetching JWKS from {jwks_url}");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let response = client
        .get(&jwks_url)
        .header("User-Agent", concat!("barista-api/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Authentication {
            message: format!("JWKS endpoint returned {}", response.status()),
        });
    }

    let jwks: JwkSet = response.json().await?;
    if jwks.keys.is_empty() {
        return Err(ApiError::Authentication {
            message: "JWKS contains no keys".to_string(),
        });
    }

    debug!("fetched JWKS with {} keys", jwks.keys.len());

    let jwks = Arc::new(jwks);
    JWKS_CACHE.insert(jwks_url, jwks.clone()).await;

    Ok(jwks)
}

/// Validate a token's signature, expiry, and audience against the JWKS,
/// returning its claims.
pub fn validate_token(
    token: &str,
    jwks: &JwkSet,
    settings: &AuthProviderSettings,
) -> Result<Claims> {
    let kid = decode_header_kid(token)?;

    let jwk = jwks.find(&kid).ok_or_else(|| ApiError::Authentication {
        message: format!("no matching key found for key id {kid}"),
    })?;

    if jwk.kty != "RSA" {
        return Err(ApiError::Authentication {
            message: format!("unsupported key type: {}", jwk.kty),
        });
    }

    let n = jwk.n.as_ref().ok_or_else(|| ApiError::Authentication {
        message: "RSA key is missing its modulus".to_string(),
    })?;
    let e = jwk.e.as_ref().ok_or_else(|| ApiError::Authentication {
        message: "RSA key is missing its exponent".to_string(),
    })?;

    let decoding_key =
        DecodingKey::from_rsa_components(n, e).map_err(|e| ApiError::Authentication {
            message: format!("invalid RSA key material: {e}"),
        })?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[settings.audience.as_str()]);

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::Authentication {
                message: "token expired".to_string(),
            },
            jsonwebtoken::errors::ErrorKind::InvalidAudience => ApiError::Authentication {
                message: "token not issued for this audience".to_string(),
            },
            _ => ApiError::Authentication {
                message: format!("token validation failed: {e}"),
            },
        })?;

    debug!("token validated for subject {}", token_data.claims.sub);

    Ok(token_data.claims)
}

/// Verify that the token audience matches the expected audience.
///
/// Providers issue tokens with a single audience (string) or multiple
/// audiences (array); both forms are accepted.
pub fn verify_audience(claims: &Claims, expected: &str) -> Result<()> {
    let found = match &claims.aud {
        Value::String(aud) => aud == expected,
        Value::Array(audiences) => audiences
            .iter()
            .any(|aud| aud.as_str() == Some(expected)),
        _ => {
            warn!("token carries an audience claim that is neither string nor array");
            return Err(ApiError::Authentication {
                message: "invalid audience format in token claims".to_string(),
            });
        }
    };

    if found {
        Ok(())
    } else {
        warn!("audience mismatch: expected {expected}, got {:?}", claims.aud);
        Err(ApiError::Authentication {
            message: "token not issued for this audience".to_string(),
        })
    }
}

/// Verify that the token issuer matches the expected issuer.
pub fn verify_issuer(claims: &Claims, expected: &str) -> Result<()> {
    if claims.iss == expected {
        Ok(())
    } else {
        warn!("issuer mismatch: expected {expected}, got {}", claims.iss);
        Err(ApiError::Authentication {
            message: "token issued by an unexpected provider".to_string(),
        })
    }
}

/// Full verification of a bearer token against the provider settings:
/// JWKS fetch, signature and expiry, audience, issuer.
pub async fn verify_bearer_token(
    token: &str,
    settings: &AuthProviderSettings,
) -> Result<Claims> {
    // Reject malformed tokens before touching the network
    decode_header_kid(token)?;

    let jwks = fetch_jwks(settings).await?;
    let claims = validate_token(token, &jwks, settings)?;

    verify_issuer(&claims, &settings.issuer())?;
    verify_audience(&claims, &settings.audience)?;

    Ok(claims)
}

/// Clear the JWKS cache; used when provider keys are rotated and in tests.
pub async fn clear_jwks_cache() {
    JWKS_CACHE.invalidate_all();
    debug!("JWKS cache cleared");
}
