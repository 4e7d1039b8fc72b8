//! SurrealDB implementation of [`SellerRequestRepository`].
//!
//! The terminal transitions (`approve_pending`, `reject_pending`) are
//! guarded with `WHERE status = 'pending'` so that two concurrent
//! admin decisions cannot both succeed: exactly one write matches,
//! the other reports no transition.

use bookmart_core::error::BookmartResult;
use bookmart_core::models::seller::SellerContact;
use bookmart_core::models::seller_request::{
    BookSubmission, RequestStatus, SellerRequest, SellerRequestDraft,
};
use bookmart_core::repository::SellerRequestRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct SellerRequestRow {
    user_id: String,
    name: String,
    email: String,
    phone: String,
    business_name: String,
    address: String,
    city: String,
    state: String,
    postal_code: String,
    tax_id: Option<String>,
    book_title: String,
    author_name: String,
    category: String,
    book_description: String,
    price: f64,
    cover_url: String,
    content_url: String,
    status: String,
    admin_response: Option<String>,
    book_id: Option<String>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
}

#[derive(Debug, SurrealValue)]
struct SellerRequestRowWithId {
    record_id: String,
    user_id: String,
    name: String,
    email: String,
    phone: String,
    business_name: String,
    address: String,
    city: String,
    state: String,
    postal_code: String,
    tax_id: Option<String>,
    book_title: String,
    author_name: String,
    category: String,
    book_description: String,
    price: f64,
    cover_url: String,
    content_url: String,
    status: String,
    admin_response: Option<String>,
    book_id: Option<String>,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    rejected_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<RequestStatus, DbError> {
    match s {
        "pending" => Ok(RequestStatus::Pending),
        "approved" => Ok(RequestStatus::Approved),
        "rejected" => Ok(RequestStatus::Rejected),
        other => Err(DbError::Corrupt(format!("unknown request status: {other}"))),
    }
}

fn status_to_string(s: RequestStatus) -> &'static str {
    match s {
        RequestStatus::Pending => "pending",
        RequestStatus::Approved => "approved",
        RequestStatus::Rejected => "rejected",
    }
}

fn row_to_request(row: SellerRequestRow, id: Uuid) -> Result<SellerRequest, DbError> {
    let book_id = row
        .book_id
        .map(|s| {
            Uuid::parse_str(&s).map_err(|e| DbError::Corrupt(format!("invalid book UUID: {e}")))
        })
        .transpose()?;

    Ok(SellerRequest {
        id,
        user_id: row.user_id,
        contact: SellerContact {
            name: row.name,
            email: row.email,
            phone: row.phone,
            business_name: row.business_name,
            address: row.address,
            city: row.city,
            state: row.state,
            postal_code: row.postal_code,
            tax_id: row.tax_id,
        },
        book: BookSubmission {
            title: row.book_title,
            author: row.author_name,
            category: row
                .category
                .parse()
                .map_err(|e| DbError::Corrupt(format!("stored request category: {e}")))?,
            description: row.book_description,
            price: row.price,
            cover_url: row.cover_url,
            content_url: row.content_url,
        },
        status: parse_status(&row.status)?,
        admin_response: row.admin_response,
        book_id,
        created_at: row.created_at,
        approved_at: row.approved_at,
        rejected_at: row.rejected_at,
    })
}

impl SellerRequestRowWithId {
    fn split(self) -> (String, SellerRequestRow) {
        (
            self.record_id,
            SellerRequestRow {
                user_id: self.user_id,
                name: self.name,
                email: self.email,
                phone: self.phone,
                business_name: self.business_name,
                address: self.address,
                city: self.city,
                state: self.state,
                postal_code: self.postal_code,
                tax_id: self.tax_id,
                book_title: self.book_title,
                author_name: self.author_name,
                category: self.category,
                book_description: self.book_description,
                price: self.price,
                cover_url: self.cover_url,
                content_url: self.content_url,
                status: self.status,
                admin_response: self.admin_response,
                book_id: self.book_id,
                created_at: self.created_at,
                approved_at: self.approved_at,
                rejected_at: self.rejected_at,
            },
        )
    }

    fn try_into_request(self) -> Result<SellerRequest, DbError> {
        let (record_id, row) = self.split();
        let id = Uuid::parse_str(&record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid request UUID: {e}")))?;
        row_to_request(row, id)
    }
}

/// SurrealDB implementation of the SellerRequest repository.
#[derive(Clone)]
pub struct SurrealSellerRequestRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSellerRequestRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SellerRequestRepository for SurrealSellerRequestRepository<C> {
    async fn create(
        &self,
        user_id: String,
        draft: SellerRequestDraft,
    ) -> BookmartResult<SellerRequest> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let contact = draft.contact;

        let result = self
            .db
            .query(
                "CREATE type::record('seller_request', $id) SET \
                 user_id = $user_id, \
                 name = $name, \
                 email = $email, \
                 phone = $phone, \
                 business_name = $business_name, \
                 address = $address, \
                 city = $city, \
                 state = $state, \
                 postal_code = $postal_code, \
                 tax_id = $tax_id, \
                 book_title = $book_title, \
                 author_name = $author_name, \
                 category = $category, \
                 book_description = $book_description, \
                 price = $price, \
                 cover_url = $cover_url, \
                 content_url = $content_url, \
                 status = $status, \
                 admin_response = NONE, \
                 book_id = NONE, \
                 approved_at = NONE, \
                 rejected_at = NONE",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id))
            .bind(("name", contact.name))
            .bind(("email", contact.email))
            .bind(("phone", contact.phone))
            .bind(("business_name", contact.business_name))
            .bind(("address", contact.address))
            .bind(("city", contact.city))
            .bind(("state", contact.state))
            .bind(("postal_code", contact.postal_code))
            .bind(("tax_id", contact.tax_id))
            .bind(("book_title", draft.book_title))
            .bind(("author_name", draft.author_name))
            .bind(("category", draft.category))
            .bind(("book_description", draft.book_description))
            .bind(("price", draft.price))
            .bind(("cover_url", draft.cover_url))
            .bind(("content_url", draft.content_url))
            .bind(("status", status_to_string(RequestStatus::Pending)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SellerRequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "seller_request".into(),
            id: id_str,
        })?;

        row_to_request(row, id).map_err(Into::into)
    }

    async fn get_by_id(&self, id: Uuid) -> BookmartResult<SellerRequest> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('seller_request', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SellerRequestRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "seller_request".into(),
            id: id_str,
        })?;

        row_to_request(row, id).map_err(Into::into)
    }

    async fn list(&self, status: Option<RequestStatus>) -> BookmartResult<Vec<SellerRequest>> {
        let mut result = match status {
            Some(s) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM seller_request \
                     WHERE status = $status ORDER BY created_at DESC",
                )
                .bind(("status", status_to_string(s)))
                .await
                .map_err(DbError::from)?,
            None => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM seller_request \
                     ORDER BY created_at DESC",
                )
                .await
                .map_err(DbError::from)?,
        };

        let rows: Vec<SellerRequestRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_request().map_err(Into::into))
            .collect()
    }

    async fn approve_pending(
        &self,
        id: Uuid,
        book_id: Uuid,
        admin_response: Option<String>,
    ) -> BookmartResult<bool> {
        let mut result = self
            .db
            .query(
                "UPDATE type::record('seller_request', $id) SET \
                 status = 'approved', \
                 book_id = $book_id, \
                 admin_response = $admin_response, \
                 approved_at = time::now() \
                 WHERE status = 'pending'",
            )
            .bind(("id", id.to_string()))
            .bind(("book_id", book_id.to_string()))
            .bind(("admin_response", admin_response))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SellerRequestRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }

    async fn reject_pending(
        &self,
        id: Uuid,
        admin_response: Option<String>,
    ) -> BookmartResult<bool> {
        let mut result = self
            .db
            .query(
                "UPDATE type::record('seller_request', $id) SET \
                 status = 'rejected', \
                 admin_response = $admin_response, \
                 rejected_at = time::now() \
                 WHERE status = 'pending'",
            )
            .bind(("id", id.to_string()))
            .bind(("admin_response", admin_response))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SellerRequestRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }
}
