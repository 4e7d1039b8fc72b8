//! Database-specific error types and conversions.

use bookmart_core::error::BookmartError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<DbError> for BookmartError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => BookmartError::NotFound { entity, id },
            other => BookmartError::Database(other.to_string()),
        }
    }
}
