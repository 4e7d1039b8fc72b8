//! Seller request workflow — submit, approve, and reject
//! orchestration.
//!
//! Approval is the one operation in the system that spans three
//! collections (seller upsert, book insert, request transition). The
//! storage writes are sequential, so the steps are ordered to make a
//! retried or concurrent approval safe:
//!
//! 1. the seller upsert is idempotent (record keyed by user id);
//! 2. the book insert happens next;
//! 3. the request transition is written last, guarded by
//!    `status == pending`, and stamps the book id together with the
//!    terminal status. If the guard misses (a concurrent decision
//!    won), the book created in step 2 is deleted as compensation and
//!    the caller gets `Conflict` — "already processed", not a blind
//!    retry.
//!
//! A request whose `book_id` is set is terminal; only a request with
//! `book_id` unset is safe to re-attempt.

use bookmart_core::error::{BookmartError, BookmartResult};
use bookmart_core::models::book::CreateBook;
use bookmart_core::models::principal::Principal;
use bookmart_core::models::seller::{SellerProfile, SellerStatus};
use bookmart_core::models::seller_request::{RequestStatus, SellerRequest, SellerRequestDraft};
use bookmart_core::policy::{self, Action, Resource};
use bookmart_core::repository::{BookRepository, SellerRepository, SellerRequestRepository};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// Result of a successful approval.
#[derive(Debug)]
pub struct Approval {
    /// Id of the book materialized from the request.
    pub book_id: Uuid,
}

/// Seller request workflow service.
///
/// Generic over repository implementations so the workflow has no
/// dependency on the database crate.
pub struct SellerRequestService<B, S, R>
where
    B: BookRepository,
    S: SellerRepository,
    R: SellerRequestRepository,
{
    books: B,
    sellers: S,
    requests: R,
}

impl<B, S, R> SellerRequestService<B, S, R>
where
    B: BookRepository,
    S: SellerRepository,
    R: SellerRequestRepository,
{
    pub fn new(books: B, sellers: S, requests: R) -> Self {
        Self {
            books,
            sellers,
            requests,
        }
    }

    /// Submit a seller request. Any authenticated principal may
    /// submit; the draft is validated before anything is persisted.
    pub async fn submit(
        &self,
        principal: &Principal,
        draft: SellerRequestDraft,
    ) -> BookmartResult<SellerRequest> {
        let submission = draft.validate()?;

        // Persist the normalized values (trimmed fields, 2-decimal
        // price) rather than the raw form input.
        let mut draft = draft;
        draft.book_title = submission.title;
        draft.author_name = submission.author;
        draft.book_description = submission.description;
        draft.price = submission.price;
        draft.cover_url = submission.cover_url;
        draft.content_url = submission.content_url;

        let request = self
            .requests
            .create(principal.subject_id.clone(), draft)
            .await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            "seller request submitted"
        );
        Ok(request)
    }

    /// Approve a pending request: promote the requester to an active
    /// seller, materialize the book, and transition the request.
    pub async fn approve(
        &self,
        principal: &Principal,
        request_id: Uuid,
        admin_response: Option<String>,
    ) -> BookmartResult<Approval> {
        policy::authorize(
            principal,
            Action::ApproveSellerRequest,
            Resource::None,
            &self.sellers,
        )
        .await?;

        let request = self.requests.get_by_id(request_id).await?;
        ensure_pending(&request)?;

        // Step 1: seller upsert, merge-updating any existing profile.
        // Idempotent: a retry after a partial failure re-applies the
        // same merged state.
        let submission = request.book.clone();
        self.upsert_seller(&request).await?;

        // Step 2: materialize the book, owned by the requester.
        let book = self
            .books
            .create(CreateBook {
                title: submission.title,
                author: submission.author,
                category: submission.category,
                description: submission.description,
                price: submission.price,
                cover_url: submission.cover_url,
                content_url: submission.content_url,
                seller_id: Some(request.user_id.clone()),
            })
            .await?;

        // Step 3 (last): guarded terminal transition, stamping the
        // book id together with the status.
        let transitioned = self
            .requests
            .approve_pending(request_id, book.id, admin_response)
            .await?;

        if !transitioned {
            // A concurrent decision won the race between our fetch
            // and this write. Compensate by removing the book we
            // just created, then report the conflict.
            if let Err(e) = self.books.delete(book.id).await {
                warn!(
                    request_id = %request_id,
                    book_id = %book.id,
                    error = %e,
                    "failed to delete orphaned book after approval conflict"
                );
            }
            return Err(BookmartError::Conflict {
                message: format!("seller request {request_id} was already processed"),
            });
        }

        info!(
            request_id = %request_id,
            book_id = %book.id,
            seller_id = %request.user_id,
            "seller request approved"
        );
        Ok(Approval { book_id: book.id })
    }

    /// Reject a pending request. No side effect beyond the guarded
    /// terminal transition.
    pub async fn reject(
        &self,
        principal: &Principal,
        request_id: Uuid,
        admin_response: Option<String>,
    ) -> BookmartResult<()> {
        policy::authorize(
            principal,
            Action::RejectSellerRequest,
            Resource::None,
            &self.sellers,
        )
        .await?;

        let request = self.requests.get_by_id(request_id).await?;
        ensure_pending(&request)?;

        let transitioned = self
            .requests
            .reject_pending(request_id, admin_response)
            .await?;

        if !transitioned {
            return Err(BookmartError::Conflict {
                message: format!("seller request {request_id} was already processed"),
            });
        }

        info!(request_id = %request_id, "seller request rejected");
        Ok(())
    }

    /// List requests, admin only.
    pub async fn list(
        &self,
        principal: &Principal,
        status: Option<RequestStatus>,
    ) -> BookmartResult<Vec<SellerRequest>> {
        policy::authorize(
            principal,
            Action::ViewAllSellerRequests,
            Resource::None,
            &self.sellers,
        )
        .await?;

        self.requests.list(status).await
    }

    /// Create or merge-update the requester's seller profile.
    ///
    /// Field-level merge on re-approval: non-empty values from the
    /// new request override, everything else keeps the existing
    /// value. Status is forced to `Active` either way.
    async fn upsert_seller(&self, request: &SellerRequest) -> BookmartResult<SellerProfile> {
        let now = Utc::now();
        let profile = match self.sellers.find_by_user_id(&request.user_id).await? {
            Some(existing) => SellerProfile {
                user_id: existing.user_id,
                contact: existing.contact.merged_with(&request.contact),
                status: SellerStatus::Active,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => SellerProfile {
                user_id: request.user_id.clone(),
                contact: request.contact.clone(),
                status: SellerStatus::Active,
                created_at: now,
                updated_at: now,
            },
        };

        self.sellers.upsert(profile).await
    }
}

fn ensure_pending(request: &SellerRequest) -> BookmartResult<()> {
    if request.status.is_terminal() {
        return Err(BookmartError::InvalidState {
            message: format!(
                "seller request {} is already {:?}",
                request.id, request.status
            ),
        });
    }
    Ok(())
}
