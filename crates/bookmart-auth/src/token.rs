//! Locally-issued JWT issuance and verification.
//!
//! These tokens are HS256-signed with a symmetric secret, carry the
//! subject's display fields plus an `is_admin` boolean claim, and
//! default to a 7-day lifetime. Verification is purely local — no
//! network round-trip — which is why the resolver tries this family
//! before the federated one.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every locally-issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalTokenClaims {
    /// Subject — the user's opaque id.
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Admin flag, asserted at issuance time.
    #[serde(default)]
    pub is_admin: bool,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// Issue a signed HS256 token for a known user.
pub fn issue_token(
    subject_id: &str,
    email: Option<&str>,
    name: Option<&str>,
    is_admin: bool,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = LocalTokenClaims {
        sub: subject_id.to_string(),
        email: email.map(String::from),
        name: name.map(String::from),
        is_admin,
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a locally-issued token.
pub fn decode_token(token: &str, config: &AuthConfig) -> Result<LocalTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<LocalTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}
