//! Bookmart Auth — local JWT issuance/verification, federated
//! identity verification seam, and principal resolution.

pub mod config;
pub mod error;
pub mod federated;
pub mod resolver;
pub mod token;

pub use config::{AuthConfig, DevPrincipal};
pub use error::AuthError;
pub use federated::{FederatedIdentity, FederatedVerifier, NoFederation};
pub use resolver::PrincipalResolver;
pub use token::LocalTokenClaims;
