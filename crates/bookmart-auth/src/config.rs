//! Authentication configuration.

/// A fixed principal returned when every verification path fails.
///
/// Development-only escape hatch: it must be explicitly set, is never
/// on by default, and a production deployment must leave it `None`.
#[derive(Debug, Clone)]
pub struct DevPrincipal {
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
}

/// Configuration for credential resolution.
///
/// Passed explicitly; the libraries never read the environment. The
/// server binary assembles this struct at the composition root.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret for HS256 signing of locally-issued tokens.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Local token lifetime in seconds (default: 604_800 = 7 days).
    pub token_lifetime_secs: u64,
    /// Emails granted admin when the credential carries no explicit
    /// admin claim. Compared case-insensitively.
    pub admin_emails: Vec<String>,
    /// Development fallback principal. `None` (the default) means
    /// unverifiable credentials fail with `Unauthenticated`.
    pub dev_principal: Option<DevPrincipal>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "bookmart".into(),
            token_lifetime_secs: 604_800,
            admin_emails: Vec::new(),
            dev_principal: None,
        }
    }
}

impl AuthConfig {
    /// Case-insensitive admin allow-list membership check.
    pub fn is_admin_email(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        self.admin_emails
            .iter()
            .any(|e| e.trim().to_lowercase() == needle)
    }
}
