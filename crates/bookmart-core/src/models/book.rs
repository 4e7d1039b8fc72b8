//! Book domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of book categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookCategory {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    Programming,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Horror,
    Bibliography,
    Romance,
    Autobiography,
    History,
    #[serde(rename = "Self-help")]
    SelfHelp,
    Memoir,
    Business,
    #[serde(rename = "Children Books")]
    ChildrenBooks,
    Travel,
    Religion,
    #[serde(rename = "Art and Design")]
    ArtAndDesign,
}

impl BookCategory {
    pub const ALL: [BookCategory; 18] = [
        BookCategory::Fiction,
        BookCategory::NonFiction,
        BookCategory::Mystery,
        BookCategory::Programming,
        BookCategory::ScienceFiction,
        BookCategory::Fantasy,
        BookCategory::Horror,
        BookCategory::Bibliography,
        BookCategory::Romance,
        BookCategory::Autobiography,
        BookCategory::History,
        BookCategory::SelfHelp,
        BookCategory::Memoir,
        BookCategory::Business,
        BookCategory::ChildrenBooks,
        BookCategory::Travel,
        BookCategory::Religion,
        BookCategory::ArtAndDesign,
    ];

    /// Storefront display label. Also the stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookCategory::Fiction => "Fiction",
            BookCategory::NonFiction => "Non-Fiction",
            BookCategory::Mystery => "Mystery",
            BookCategory::Programming => "Programming",
            BookCategory::ScienceFiction => "Science Fiction",
            BookCategory::Fantasy => "Fantasy",
            BookCategory::Horror => "Horror",
            BookCategory::Bibliography => "Bibliography",
            BookCategory::Romance => "Romance",
            BookCategory::Autobiography => "Autobiography",
            BookCategory::History => "History",
            BookCategory::SelfHelp => "Self-help",
            BookCategory::Memoir => "Memoir",
            BookCategory::Business => "Business",
            BookCategory::ChildrenBooks => "Children Books",
            BookCategory::Travel => "Travel",
            BookCategory::Religion => "Religion",
            BookCategory::ArtAndDesign => "Art and Design",
        }
    }
}

impl fmt::Display for BookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category string is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown book category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for BookCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookCategory::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A sellable item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub category: BookCategory,
    pub description: String,
    /// Positive price in storefront currency, 2-decimal precision.
    pub price: f64,
    pub cover_url: String,
    pub content_url: String,
    /// Owning seller's subject id. `None` means platform-owned: only
    /// an admin may mutate or delete it.
    pub seller_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub category: BookCategory,
    pub description: String,
    pub price: f64,
    pub cover_url: String,
    pub content_url: String,
    pub seller_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<BookCategory>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cover_url: Option<String>,
    pub content_url: Option<String>,
}
