//! Authentication error types.

use bookmart_core::error::BookmartError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("identity provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for BookmartError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired
            | AuthError::TokenInvalid(_)
            | AuthError::ProviderUnreachable(_) => BookmartError::Unauthenticated {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => BookmartError::Crypto(msg),
        }
    }
}
