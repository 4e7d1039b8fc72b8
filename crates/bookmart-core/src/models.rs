//! Domain models for Bookmart.
//!
//! These are the core types shared across all crates.

pub mod book;
pub mod principal;
pub mod seller;
pub mod seller_request;
