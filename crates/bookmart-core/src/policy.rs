//! Access policy and book ownership gate.
//!
//! Every authorization decision is made here, from a resolved
//! [`Principal`] and the current contents of storage. Nothing is
//! cached across requests: seller status is re-read on every check so
//! a mid-session approval takes effect on the very next request.

use uuid::Uuid;

use crate::error::{BookmartError, BookmartResult};
use crate::models::book::Book;
use crate::models::principal::Principal;
use crate::models::seller::SellerStatus;
use crate::repository::{BookRepository, SellerRepository};

/// The actions gated by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateBook,
    EditBook,
    DeleteBook,
    ViewAllBooks,
    ApproveSellerRequest,
    RejectSellerRequest,
    ViewAllSellerRequests,
    ViewDashboardAnalytics,
    ViewOwnAnalytics,
}

/// The resource an action targets, if any.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    None,
    Book(&'a Book),
}

/// Whether the principal currently holds an active seller profile.
///
/// This is a live storage read, never cached on the principal.
pub async fn is_active_seller<S: SellerRepository>(
    principal: &Principal,
    sellers: &S,
) -> BookmartResult<bool> {
    let profile = sellers.find_by_user_id(&principal.subject_id).await?;
    Ok(profile.is_some_and(|p| p.status == SellerStatus::Active))
}

/// Decide whether `principal` may perform `action` on `resource`.
///
/// Precedence: the admin check short-circuits before any seller or
/// ownership lookup, so an admin editing another seller's book
/// succeeds even though the ownership branch would fail.
pub async fn allow<S: SellerRepository>(
    principal: &Principal,
    action: Action,
    resource: Resource<'_>,
    sellers: &S,
) -> BookmartResult<bool> {
    if principal.admin {
        return Ok(true);
    }

    match action {
        Action::ViewAllBooks => Ok(true),
        Action::CreateBook | Action::ViewOwnAnalytics => {
            is_active_seller(principal, sellers).await
        }
        Action::EditBook | Action::DeleteBook => match resource {
            Resource::Book(book) => Ok(owns(principal, book)),
            Resource::None => Ok(false),
        },
        Action::ApproveSellerRequest
        | Action::RejectSellerRequest
        | Action::ViewAllSellerRequests
        | Action::ViewDashboardAnalytics => Ok(false),
    }
}

/// Like [`allow`], but produces the `Forbidden` error the mutating
/// endpoints surface on denial.
pub async fn authorize<S: SellerRepository>(
    principal: &Principal,
    action: Action,
    resource: Resource<'_>,
    sellers: &S,
) -> BookmartResult<()> {
    if allow(principal, action, resource, sellers).await? {
        Ok(())
    } else {
        Err(BookmartError::Forbidden {
            reason: format!("{action:?} requires a role this account does not hold"),
        })
    }
}

fn owns(principal: &Principal, book: &Book) -> bool {
    book.seller_id.as_deref() == Some(principal.subject_id.as_str())
}

/// Book ownership gate: may `principal` mutate or delete `book`?
///
/// True iff the principal is an admin, or the book carries a seller
/// id equal to the principal's subject id. A platform-owned book
/// (no seller id) can only be touched by an admin.
pub fn can_mutate(principal: &Principal, book: &Book) -> bool {
    principal.admin || owns(principal, book)
}

/// Fetch a book and gate its mutation in one step.
///
/// Ownership cannot be checked against a non-existent resource, so
/// the fetch happens first: `NotFound` if the book is absent, then
/// `Forbidden` unless [`can_mutate`] holds. Returns the fetched book
/// so callers don't re-read it.
pub async fn authorize_book_mutation<B: BookRepository>(
    principal: &Principal,
    book_id: Uuid,
    books: &B,
) -> BookmartResult<Book> {
    let book = books.get_by_id(book_id).await?;
    if can_mutate(principal, &book) {
        Ok(book)
    } else {
        Err(BookmartError::Forbidden {
            reason: "only the owning seller or an admin may modify this book".into(),
        })
    }
}
