//! SurrealDB implementation of [`BookRepository`].

use bookmart_core::error::BookmartResult;
use bookmart_core::models::book::{Book, BookCategory, CreateBook, UpdateBook};
use bookmart_core::repository::BookRepository;
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BookRow {
    title: String,
    author: String,
    category: String,
    description: String,
    price: f64,
    cover_url: String,
    content_url: String,
    seller_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct BookRowWithId {
    record_id: String,
    title: String,
    author: String,
    category: String,
    description: String,
    price: f64,
    cover_url: String,
    content_url: String,
    seller_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_category(s: &str) -> Result<BookCategory, DbError> {
    s.parse()
        .map_err(|e| DbError::Corrupt(format!("stored book category: {e}")))
}

fn row_to_book(row: BookRow, id: Uuid) -> Result<Book, DbError> {
    Ok(Book {
        id,
        title: row.title,
        author: row.author,
        category: parse_category(&row.category)?,
        description: row.description,
        price: row.price,
        cover_url: row.cover_url,
        content_url: row.content_url,
        seller_id: row.seller_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

impl BookRowWithId {
    fn try_into_book(self) -> Result<Book, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid book UUID: {e}")))?;
        Ok(Book {
            id,
            title: self.title,
            author: self.author,
            category: parse_category(&self.category)?,
            description: self.description,
            price: self.price,
            cover_url: self.cover_url,
            content_url: self.content_url,
            seller_id: self.seller_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Book repository.
#[derive(Clone)]
pub struct SurrealBookRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBookRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BookRepository for SurrealBookRepository<C> {
    async fn create(&self, input: CreateBook) -> BookmartResult<Book> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('book', $id) SET \
                 title = $title, \
                 author = $author, \
                 category = $category, \
                 description = $description, \
                 price = $price, \
                 cover_url = $cover_url, \
                 content_url = $content_url, \
                 seller_id = $seller_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("author", input.author))
            .bind(("category", input.category.as_str()))
            .bind(("description", input.description))
            .bind(("price", input.price))
            .bind(("cover_url", input.cover_url))
            .bind(("content_url", input.content_url))
            .bind(("seller_id", input.seller_id))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<BookRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "book".into(),
            id: id_str,
        })?;

        row_to_book(row, id).map_err(Into::into)
    }

    async fn get_by_id(&self, id: Uuid) -> BookmartResult<Book> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('book', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "book".into(),
            id: id_str,
        })?;

        row_to_book(row, id).map_err(Into::into)
    }

    async fn update(&self, id: Uuid, input: UpdateBook) -> BookmartResult<Book> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.author.is_some() {
            sets.push("author = $author");
        }
        if input.category.is_some() {
            sets.push("category = $category");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.cover_url.is_some() {
            sets.push("cover_url = $cover_url");
        }
        if input.content_url.is_some() {
            sets.push("content_url = $content_url");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('book', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(author) = input.author {
            builder = builder.bind(("author", author));
        }
        if let Some(category) = input.category {
            builder = builder.bind(("category", category.as_str()));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(cover_url) = input.cover_url {
            builder = builder.bind(("cover_url", cover_url));
        }
        if let Some(content_url) = input.content_url {
            builder = builder.bind(("content_url", content_url));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<BookRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "book".into(),
            id: id_str,
        })?;

        row_to_book(row, id).map_err(Into::into)
    }

    async fn delete(&self, id: Uuid) -> BookmartResult<()> {
        self.db
            .query("DELETE type::record('book', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, category: Option<BookCategory>) -> BookmartResult<Vec<Book>> {
        let mut result = match category {
            Some(cat) => self
                .db
                .query(
                    "SELECT meta::id(id) AS record_id, * FROM book \
                     WHERE category = $category ORDER BY created_at DESC",
                )
                .bind(("category", cat.as_str()))
                .await
                .map_err(DbError::from)?,
            None => self
                .db
                .query("SELECT meta::id(id) AS record_id, * FROM book ORDER BY created_at DESC")
                .await
                .map_err(DbError::from)?,
        };

        let rows: Vec<BookRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .map(|row| row.try_into_book().map_err(Into::into))
            .collect()
    }
}
