//! Principal resolution from an opaque bearer credential.
//!
//! Two credential families are supported and disambiguated by
//! attempting verification in a fixed order: locally-issued tokens
//! first (self-contained, no I/O), then the federated provider. The
//! order is deliberate — the local path has no external dependency,
//! so trying it first keeps latency low and shrinks the blast radius
//! of a provider outage.

use bookmart_core::error::{BookmartError, BookmartResult};
use bookmart_core::models::principal::{CredentialKind, Principal};
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::federated::{FederatedIdentity, FederatedVerifier};
use crate::token;

/// Resolves bearer credentials into per-request [`Principal`]s.
///
/// The resolver is pure with respect to storage: any profile upsert
/// for first-seen federated identities is the caller's job.
pub struct PrincipalResolver<F: FederatedVerifier> {
    config: AuthConfig,
    federated: F,
}

impl<F: FederatedVerifier> PrincipalResolver<F> {
    pub fn new(config: AuthConfig, federated: F) -> Self {
        Self { config, federated }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Resolve a bearer credential to a [`Principal`].
    ///
    /// Malformed, expired, and unverifiable credentials all collapse
    /// to `Unauthenticated`. If a development principal is configured
    /// (explicit non-production opt-in), it is returned instead of
    /// failing — never in a default configuration.
    pub async fn resolve(&self, credential: &str) -> BookmartResult<Principal> {
        match token::decode_token(credential, &self.config) {
            Ok(claims) => {
                return Ok(Principal {
                    subject_id: claims.sub,
                    email: claims.email,
                    display_name: claims.name,
                    admin: claims.is_admin,
                    credential: CredentialKind::Jwt,
                });
            }
            Err(e) => {
                debug!(error = %e, "local token verification failed, trying federated");
            }
        }

        match self.federated.verify(credential).await {
            Ok(identity) => {
                let admin = self.admin_from_identity(&identity);
                return Ok(Principal {
                    subject_id: identity.subject,
                    email: identity.email,
                    display_name: identity.name,
                    admin,
                    credential: CredentialKind::Federated,
                });
            }
            Err(e) => {
                debug!(error = %e, "federated verification failed");
            }
        }

        if let Some(dev) = &self.config.dev_principal {
            warn!("authentication bypassed: returning configured development principal");
            return Ok(Principal {
                subject_id: dev.subject_id.clone(),
                email: Some(dev.email.clone()),
                display_name: Some(dev.display_name.clone()),
                admin: self.config.is_admin_email(&dev.email),
                credential: CredentialKind::Federated,
            });
        }

        Err(BookmartError::Unauthenticated {
            reason: "credential could not be verified".into(),
        })
    }

    /// Single source of truth for federated admin detection.
    ///
    /// Precedence: an explicit admin claim of `true` wins; otherwise
    /// the configured email allow-list is consulted. A claim of
    /// `false` or `None` does not veto the allow-list.
    fn admin_from_identity(&self, identity: &FederatedIdentity) -> bool {
        if identity.admin_claim == Some(true) {
            return true;
        }
        identity
            .email
            .as_deref()
            .is_some_and(|email| self.config.is_admin_email(email))
    }
}
