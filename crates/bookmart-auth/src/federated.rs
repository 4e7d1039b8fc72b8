//! Federated identity verification seam.
//!
//! The external provider (public-key verified ID tokens) is modeled
//! as a trait so the resolver can be tested without network access
//! and the provider SDK stays out of this crate.

use crate::error::AuthError;

/// Identity attributes returned by a federated provider after
/// successful token verification.
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// The provider's custom admin claim, if the token carried one.
    pub admin_claim: Option<bool>,
}

/// Verifies a federated ID token against the provider's public keys.
///
/// Implementations may perform network I/O (key fetch, token
/// introspection). Any failure — bad signature, expiry, provider
/// unreachable — is an [`AuthError`] and collapses to
/// `Unauthenticated` at the boundary.
pub trait FederatedVerifier: Send + Sync {
    fn verify(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<FederatedIdentity, AuthError>> + Send;
}

/// Verifier for deployments with no federated provider configured:
/// every token fails, so only locally-issued tokens authenticate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFederation;

impl FederatedVerifier for NoFederation {
    async fn verify(&self, _token: &str) -> Result<FederatedIdentity, AuthError> {
        Err(AuthError::TokenInvalid(
            "no federated identity provider configured".into(),
        ))
    }
}
