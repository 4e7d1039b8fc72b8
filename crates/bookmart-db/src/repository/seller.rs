//! SurrealDB implementation of [`SellerRepository`].
//!
//! Seller records are keyed by user id (`seller:<user_id>`), so the
//! at-most-one-profile-per-user invariant holds structurally and
//! `upsert` is a single idempotent write.

use bookmart_core::error::BookmartResult;
use bookmart_core::models::seller::{SellerContact, SellerProfile, SellerStatus};
use bookmart_core::repository::SellerRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct SellerRow {
    name: String,
    email: String,
    phone: String,
    business_name: String,
    address: String,
    city: String,
    state: String,
    postal_code: String,
    tax_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<SellerStatus, DbError> {
    match s {
        "active" => Ok(SellerStatus::Active),
        "inactive" => Ok(SellerStatus::Inactive),
        other => Err(DbError::Corrupt(format!("unknown seller status: {other}"))),
    }
}

fn status_to_string(s: SellerStatus) -> &'static str {
    match s {
        SellerStatus::Active => "active",
        SellerStatus::Inactive => "inactive",
    }
}

fn row_to_profile(row: SellerRow, user_id: String) -> Result<SellerProfile, DbError> {
    Ok(SellerProfile {
        user_id,
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
        status: parse_status(&row.status)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// SurrealDB implementation of the Seller repository.
#[derive(Clone)]
pub struct SurrealSellerRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSellerRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SellerRepository for SurrealSellerRepository<C> {
    async fn upsert(&self, profile: SellerProfile) -> BookmartResult<SellerProfile> {
        let user_id = profile.user_id.clone();
        let contact = profile.contact;

        let result = self
            .db
            .query(
                "UPSERT type::record('seller', $user_id) SET \
                 name = $name, \
                 email = $email, \
                 phone = $phone, \
                 business_name = $business_name, \
                 address = $address, \
                 city = $city, \
                 state = $state, \
                 postal_code = $postal_code, \
                 tax_id = $tax_id, \
                 status = $status, \
                 updated_at = time::now()",
            )
            .bind(("user_id", user_id.clone()))
            .bind(("name", contact.name))
            .bind(("email", contact.email))
            .bind(("phone", contact.phone))
            .bind(("business_name", contact.business_name))
            .bind(("address", contact.address))
            .bind(("city", contact.city))
            .bind(("state", contact.state))
            .bind(("postal_code", contact.postal_code))
            .bind(("tax_id", contact.tax_id))
            .bind(("status", status_to_string(profile.status)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<SellerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "seller".into(),
            id: user_id.clone(),
        })?;

        row_to_profile(row, user_id).map_err(Into::into)
    }

    async fn find_by_user_id(&self, user_id: &str) -> BookmartResult<Option<SellerProfile>> {
        let user_id_owned = user_id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('seller', $user_id)")
            .bind(("user_id", user_id_owned.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SellerRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row_to_profile(row, user_id_owned)?)),
            None => Ok(None),
        }
    }
}
