//! Integration tests for principal resolution.

use bookmart_auth::config::{AuthConfig, DevPrincipal};
use bookmart_auth::error::AuthError;
use bookmart_auth::federated::{FederatedIdentity, FederatedVerifier, NoFederation};
use bookmart_auth::resolver::PrincipalResolver;
use bookmart_auth::token;
use bookmart_core::error::BookmartError;
use bookmart_core::models::principal::CredentialKind;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "resolver-test-secret".into(),
        jwt_issuer: "bookmart-test".into(),
        token_lifetime_secs: 604_800,
        admin_emails: vec!["Owner@Example.com".into()],
        dev_principal: None,
    }
}

/// Stub provider: accepts exactly one token string.
struct StubVerifier {
    expected_token: String,
    identity: FederatedIdentity,
}

impl FederatedVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<FederatedIdentity, AuthError> {
        if token == self.expected_token {
            Ok(self.identity.clone())
        } else {
            Err(AuthError::TokenInvalid("signature mismatch".into()))
        }
    }
}

#[tokio::test]
async fn local_token_resolves_without_federation() {
    let cfg = test_config();
    let bearer =
        token::issue_token("user-7", Some("u7@example.com"), Some("User Seven"), false, &cfg)
            .unwrap();

    let resolver = PrincipalResolver::new(cfg, NoFederation);
    let principal = resolver.resolve(&bearer).await.unwrap();

    assert_eq!(principal.subject_id, "user-7");
    assert_eq!(principal.email.as_deref(), Some("u7@example.com"));
    assert_eq!(principal.credential, CredentialKind::Jwt);
    assert!(!principal.admin);
}

#[tokio::test]
async fn local_admin_claim_is_honored() {
    let cfg = test_config();
    let bearer = token::issue_token("root-1", Some("root@example.com"), None, true, &cfg).unwrap();

    let resolver = PrincipalResolver::new(cfg, NoFederation);
    let principal = resolver.resolve(&bearer).await.unwrap();
    assert!(principal.admin);
}

#[tokio::test]
async fn tampered_local_token_is_unauthenticated() {
    let cfg = test_config();
    let mut bearer = token::issue_token("user-7", None, None, false, &cfg).unwrap();
    bearer.push('x');

    let resolver = PrincipalResolver::new(cfg, NoFederation);
    let err = resolver.resolve(&bearer).await.unwrap_err();
    assert!(matches!(err, BookmartError::Unauthenticated { .. }));
}

#[tokio::test]
async fn expired_local_token_is_unauthenticated() {
    let cfg = test_config();

    // Hand-craft a token whose expiry is past the validation leeway.
    let now = chrono::Utc::now().timestamp();
    let claims = bookmart_auth::LocalTokenClaims {
        sub: "user-7".into(),
        email: None,
        name: None,
        is_admin: false,
        iss: cfg.jwt_issuer.clone(),
        iat: now - 3600,
        exp: now - 600,
        jti: "test-jti".into(),
    };
    let bearer = jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .unwrap();

    let resolver = PrincipalResolver::new(cfg, NoFederation);
    let err = resolver.resolve(&bearer).await.unwrap_err();
    assert!(matches!(err, BookmartError::Unauthenticated { .. }));
}

#[tokio::test]
async fn federated_token_is_tried_after_local_failure() {
    let cfg = test_config();
    let resolver = PrincipalResolver::new(
        cfg,
        StubVerifier {
            expected_token: "provider-token".into(),
            identity: FederatedIdentity {
                subject: "fed-uid-1".into(),
                email: Some("someone@example.com".into()),
                name: Some("Someone".into()),
                admin_claim: None,
            },
        },
    );

    let principal = resolver.resolve("provider-token").await.unwrap();
    assert_eq!(principal.subject_id, "fed-uid-1");
    assert_eq!(principal.credential, CredentialKind::Federated);
    assert!(!principal.admin);
}

#[tokio::test]
async fn federated_admin_claim_takes_precedence() {
    let resolver = PrincipalResolver::new(
        test_config(),
        StubVerifier {
            expected_token: "provider-token".into(),
            identity: FederatedIdentity {
                subject: "fed-uid-1".into(),
                email: Some("not-on-the-list@example.com".into()),
                name: None,
                admin_claim: Some(true),
            },
        },
    );

    let principal = resolver.resolve("provider-token").await.unwrap();
    assert!(principal.admin);
}

#[tokio::test]
async fn allow_list_grants_admin_case_insensitively() {
    let resolver = PrincipalResolver::new(
        test_config(),
        StubVerifier {
            expected_token: "provider-token".into(),
            identity: FederatedIdentity {
                subject: "fed-uid-2".into(),
                email: Some("owner@example.com".into()),
                name: None,
                admin_claim: Some(false),
            },
        },
    );

    // Claim is false but the allow-list still grants admin.
    let principal = resolver.resolve("provider-token").await.unwrap();
    assert!(principal.admin);
}

#[tokio::test]
async fn unverifiable_credential_fails_by_default() {
    let resolver = PrincipalResolver::new(test_config(), NoFederation);
    let err = resolver.resolve("complete-garbage").await.unwrap_err();
    assert!(matches!(err, BookmartError::Unauthenticated { .. }));
}

#[tokio::test]
async fn dev_principal_requires_explicit_opt_in() {
    let mut cfg = test_config();
    cfg.dev_principal = Some(DevPrincipal {
        subject_id: "dev-user".into(),
        email: "dev@example.com".into(),
        display_name: "Development User".into(),
    });

    let resolver = PrincipalResolver::new(cfg, NoFederation);
    let principal = resolver.resolve("complete-garbage").await.unwrap();
    assert_eq!(principal.subject_id, "dev-user");
    assert!(!principal.admin);
}
