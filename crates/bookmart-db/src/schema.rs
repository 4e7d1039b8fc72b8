//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! Statuses and book categories are stored as strings with ASSERT
//! constraints matching the closed sets in the domain model. Seller
//! records are keyed by user id, which makes the one-profile-per-user
//! invariant structural.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Books
-- =======================================================================
DEFINE TABLE book SCHEMAFULL;
DEFINE FIELD title ON TABLE book TYPE string;
DEFINE FIELD author ON TABLE book TYPE string;
DEFINE FIELD category ON TABLE book TYPE string \
    ASSERT $value IN ['Fiction', 'Non-Fiction', 'Mystery', \
    'Programming', 'Science Fiction', 'Fantasy', 'Horror', \
    'Bibliography', 'Romance', 'Autobiography', 'History', \
    'Self-help', 'Memoir', 'Business', 'Children Books', 'Travel', \
    'Religion', 'Art and Design'];
DEFINE FIELD description ON TABLE book TYPE string;
DEFINE FIELD price ON TABLE book TYPE float ASSERT $value > 0;
DEFINE FIELD cover_url ON TABLE book TYPE string;
DEFINE FIELD content_url ON TABLE book TYPE string;
DEFINE FIELD seller_id ON TABLE book TYPE option<string>;
DEFINE FIELD created_at ON TABLE book TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE book TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_book_category ON TABLE book COLUMNS category;
DEFINE INDEX idx_book_seller ON TABLE book COLUMNS seller_id;

-- =======================================================================
-- Sellers (record id = user id, one profile per user)
-- =======================================================================
DEFINE TABLE seller SCHEMAFULL;
DEFINE FIELD name ON TABLE seller TYPE string;
DEFINE FIELD email ON TABLE seller TYPE string;
DEFINE FIELD phone ON TABLE seller TYPE string;
DEFINE FIELD business_name ON TABLE seller TYPE string;
DEFINE FIELD address ON TABLE seller TYPE string;
DEFINE FIELD city ON TABLE seller TYPE string;
DEFINE FIELD state ON TABLE seller TYPE string;
DEFINE FIELD postal_code ON TABLE seller TYPE string;
DEFINE FIELD tax_id ON TABLE seller TYPE option<string>;
DEFINE FIELD status ON TABLE seller TYPE string \
    ASSERT $value IN ['active', 'inactive'];
DEFINE FIELD created_at ON TABLE seller TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE seller TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Seller requests
-- =======================================================================
DEFINE TABLE seller_request SCHEMAFULL;
DEFINE FIELD user_id ON TABLE seller_request TYPE string;
DEFINE FIELD name ON TABLE seller_request TYPE string;
DEFINE FIELD email ON TABLE seller_request TYPE string;
DEFINE FIELD phone ON TABLE seller_request TYPE string;
DEFINE FIELD business_name ON TABLE seller_request TYPE string;
DEFINE FIELD address ON TABLE seller_request TYPE string;
DEFINE FIELD city ON TABLE seller_request TYPE string;
DEFINE FIELD state ON TABLE seller_request TYPE string;
DEFINE FIELD postal_code ON TABLE seller_request TYPE string;
DEFINE FIELD tax_id ON TABLE seller_request TYPE option<string>;
DEFINE FIELD book_title ON TABLE seller_request TYPE string;
DEFINE FIELD author_name ON TABLE seller_request TYPE string;
DEFINE FIELD category ON TABLE seller_request TYPE string;
DEFINE FIELD book_description ON TABLE seller_request TYPE string;
DEFINE FIELD price ON TABLE seller_request TYPE float;
DEFINE FIELD cover_url ON TABLE seller_request TYPE string;
DEFINE FIELD content_url ON TABLE seller_request TYPE string;
DEFINE FIELD status ON TABLE seller_request TYPE string \
    ASSERT $value IN ['pending', 'approved', 'rejected'];
DEFINE FIELD admin_response ON TABLE seller_request \
    TYPE option<string>;
DEFINE FIELD book_id ON TABLE seller_request TYPE option<string>;
DEFINE FIELD created_at ON TABLE seller_request TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD approved_at ON TABLE seller_request \
    TYPE option<datetime>;
DEFINE FIELD rejected_at ON TABLE seller_request \
    TYPE option<datetime>;
DEFINE INDEX idx_seller_request_user ON TABLE seller_request \
    COLUMNS user_id;
DEFINE INDEX idx_seller_request_status ON TABLE seller_request \
    COLUMNS status;
";

/// Apply any pending migrations, tracking versions in `_migration`.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_defines_every_category() {
        use bookmart_core::models::book::BookCategory;
        for cat in BookCategory::ALL {
            assert!(
                SCHEMA_V1.contains(&format!("'{}'", cat.as_str())),
                "schema missing category {cat}"
            );
        }
    }

    #[test]
    fn migrations_are_ordered() {
        let mut last = 0;
        for m in MIGRATIONS {
            assert!(m.version > last);
            last = m.version;
        }
    }
}
