//! Bookmart Core — domain models, repository traits, and the access
//! policy that gates every mutating storefront operation.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;

pub use error::{BookmartError, BookmartResult};
