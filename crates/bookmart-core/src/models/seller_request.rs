//! Seller request domain model and submission validation.
//!
//! A seller request bundles onboarding contact details with one
//! book's metadata in a single submission. Its status is a one-way
//! state machine: `Pending` transitions exactly once, to `Approved`
//! or `Rejected`, both terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookmartError, BookmartResult};
use crate::models::book::BookCategory;
use crate::models::seller::SellerContact;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

/// Validated book metadata carried by a seller request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSubmission {
    pub title: String,
    pub author: String,
    pub category: BookCategory,
    pub description: String,
    pub price: f64,
    pub cover_url: String,
    pub content_url: String,
}

/// A pending ask to become a seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRequest {
    pub id: Uuid,
    /// Requester's subject id.
    pub user_id: String,
    pub contact: SellerContact,
    pub book: BookSubmission,
    pub status: RequestStatus,
    pub admin_response: Option<String>,
    /// Id of the book materialized by approval. Stamped together with
    /// the terminal status transition, as the last write of approve.
    pub book_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
}

/// Unvalidated submission input, as received from the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRequestDraft {
    pub contact: SellerContact,
    pub book_title: String,
    pub author_name: String,
    pub category: String,
    pub book_description: String,
    pub price: f64,
    pub cover_url: String,
    pub content_url: String,
}

impl SellerRequestDraft {
    /// Validate every field and produce the typed book submission.
    ///
    /// All failures are collected into a single `Validation` error
    /// rather than stopping at the first one.
    pub fn validate(&self) -> BookmartResult<BookSubmission> {
        let mut problems = Vec::new();

        let contact_fields = [
            ("name", &self.contact.name),
            ("email", &self.contact.email),
            ("phone", &self.contact.phone),
            ("business_name", &self.contact.business_name),
            ("address", &self.contact.address),
            ("city", &self.contact.city),
            ("state", &self.contact.state),
            ("postal_code", &self.contact.postal_code),
        ];
        for (field, value) in contact_fields {
            if value.trim().is_empty() {
                problems.push(format!("seller {field} is required"));
            }
        }

        let book_fields = [
            ("title", &self.book_title),
            ("author", &self.author_name),
            ("description", &self.book_description),
            ("cover_url", &self.cover_url),
            ("content_url", &self.content_url),
        ];
        for (field, value) in book_fields {
            if value.trim().is_empty() {
                problems.push(format!("book {field} is required"));
            }
        }

        let category = self.category.parse::<BookCategory>();
        if let Err(e) = &category {
            problems.push(e.to_string());
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            problems.push("price must be a positive number".into());
        }

        if !problems.is_empty() {
            return Err(BookmartError::Validation {
                message: problems.join(", "),
            });
        }

        // An empty problem list implies the parse succeeded.
        let category = category.map_err(|e| BookmartError::Validation {
            message: e.to_string(),
        })?;

        Ok(BookSubmission {
            title: self.book_title.trim().to_string(),
            author: self.author_name.trim().to_string(),
            category,
            description: self.book_description.trim().to_string(),
            // 2-decimal currency precision
            price: (self.price * 100.0).round() / 100.0,
            cover_url: self.cover_url.trim().to_string(),
            content_url: self.content_url.trim().to_string(),
        })
    }
}
