//! Bookmart Server — application entry point.
//!
//! This is the composition root: the only place configuration is
//! read from the environment and assembled into the explicit config
//! structs the libraries take.

use bookmart_auth::{AuthConfig, DevPrincipal};
use bookmart_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn db_config_from_env() -> DbConfig {
    DbConfig {
        url: env_or("BOOKMART_DB_URL", "127.0.0.1:8000"),
        namespace: env_or("BOOKMART_DB_NAMESPACE", "bookmart"),
        database: env_or("BOOKMART_DB_NAME", "store"),
        username: env_or("BOOKMART_DB_USER", "root"),
        password: env_or("BOOKMART_DB_PASS", "root"),
    }
}

fn auth_config_from_env() -> AuthConfig {
    let admin_emails = std::env::var("BOOKMART_ADMIN_EMAILS")
        .map(|v| {
            v.split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect()
        })
        .unwrap_or_default();

    // The development principal is opt-in and only honored outside
    // production configurations.
    let dev_principal = std::env::var("BOOKMART_DEV_USER_EMAIL")
        .ok()
        .map(|email| DevPrincipal {
            subject_id: "dev-user".into(),
            email,
            display_name: "Development User".into(),
        });

    // 7-day default, matching locally-issued token expiry.
    let token_lifetime_secs = std::env::var("BOOKMART_TOKEN_LIFETIME_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(604_800);

    AuthConfig {
        jwt_secret: env_or("BOOKMART_JWT_SECRET", ""),
        jwt_issuer: env_or("BOOKMART_JWT_ISSUER", "bookmart"),
        token_lifetime_secs,
        admin_emails,
        dev_principal,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("bookmart=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Bookmart server...");

    let db_config = db_config_from_env();
    let auth_config = auth_config_from_env();

    if auth_config.jwt_secret.is_empty() {
        tracing::error!("BOOKMART_JWT_SECRET is not set");
        std::process::exit(1);
    }
    if auth_config.dev_principal.is_some() {
        tracing::warn!("development principal enabled; do not use in production");
    }

    let manager = match DbManager::connect(&db_config).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = bookmart_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "migrations failed");
        std::process::exit(1);
    }

    // TODO: mount the HTTP routing layer once it lands; the policy,
    // resolver, and workflow services are ready to be wired in.

    tracing::info!("Bookmart server initialized.");
}
