//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in the
//! database crate; the policy and workflow layers depend only on
//! these traits so they can be exercised against in-memory fakes.

use uuid::Uuid;

use crate::error::BookmartResult;
use crate::models::{
    book::{Book, BookCategory, CreateBook, UpdateBook},
    seller::SellerProfile,
    seller_request::{RequestStatus, SellerRequest, SellerRequestDraft},
};

pub trait BookRepository: Send + Sync {
    fn create(&self, input: CreateBook) -> impl Future<Output = BookmartResult<Book>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BookmartResult<Book>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateBook,
    ) -> impl Future<Output = BookmartResult<Book>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = BookmartResult<()>> + Send;
    fn list(
        &self,
        category: Option<BookCategory>,
    ) -> impl Future<Output = BookmartResult<Vec<Book>>> + Send;
}

pub trait SellerRepository: Send + Sync {
    /// Write the full profile, creating or replacing the record for
    /// its user id. The one-profile-per-user invariant is enforced by
    /// keying the record on the user id.
    fn upsert(
        &self,
        profile: SellerProfile,
    ) -> impl Future<Output = BookmartResult<SellerProfile>> + Send;

    /// Point-in-time lookup used by authorization decisions. Returns
    /// `None` rather than an error so "is this caller a seller" reads
    /// as a plain predicate.
    fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> impl Future<Output = BookmartResult<Option<SellerProfile>>> + Send;
}

pub trait SellerRequestRepository: Send + Sync {
    /// Persist a validated draft in `Pending` state.
    fn create(
        &self,
        user_id: String,
        draft: SellerRequestDraft,
    ) -> impl Future<Output = BookmartResult<SellerRequest>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BookmartResult<SellerRequest>> + Send;

    fn list(
        &self,
        status: Option<RequestStatus>,
    ) -> impl Future<Output = BookmartResult<Vec<SellerRequest>>> + Send;

    /// Conditionally transition a request to `Approved`, stamping the
    /// materialized book id, the approval time, and the optional admin
    /// response. The write is guarded by `status == Pending`; returns
    /// whether a row actually transitioned. A `false` return means a
    /// concurrent decision won the race.
    fn approve_pending(
        &self,
        id: Uuid,
        book_id: Uuid,
        admin_response: Option<String>,
    ) -> impl Future<Output = BookmartResult<bool>> + Send;

    /// Conditionally transition a request to `Rejected`. Same guard
    /// semantics as [`approve_pending`](Self::approve_pending).
    fn reject_pending(
        &self,
        id: Uuid,
        admin_response: Option<String>,
    ) -> impl Future<Output = BookmartResult<bool>> + Send;
}
