//! Bookmart Workflow — the seller-onboarding state machine
//! (submit / approve / reject) and its multi-collection side effects.

pub mod service;

pub use service::{Approval, SellerRequestService};
