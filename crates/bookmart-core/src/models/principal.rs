//! Principal domain model.
//!
//! A [`Principal`] is the resolved caller identity for a single
//! request. It is derived from a bearer credential, lives only for
//! the duration of that request, and is never persisted. Seller
//! status is deliberately NOT part of the principal — it can change
//! between requests (mid-session approval) and must be re-read from
//! storage at decision time.

use serde::{Deserialize, Serialize};

/// Which credential family the principal was resolved from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CredentialKind {
    /// Locally-issued signed token (self-verifiable, symmetric secret).
    Jwt,
    /// Federated-identity token verified against an external provider.
    Federated,
}

/// Resolved identity for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque subject id. Federated subjects are not UUIDs, so this
    /// stays a plain string throughout the system.
    pub subject_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Derived admin flag. Admin short-circuits every policy check.
    pub admin: bool,
    pub credential: CredentialKind,
}

impl Principal {
    /// Case-normalized email for allow-list comparisons.
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_ref().map(|e| e.trim().to_lowercase())
    }
}
