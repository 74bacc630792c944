//! Book aggregate and its gallery images.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::CatalogueValidationError;
use super::references::{Author, Category, ContentFormat, Language, Publisher, Translator};

/// Primary key of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Storage key of a blob, resolved to a URL by a
/// [`crate::domain::ports::BlobUrlResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate a non-blank storage key.
    pub fn new(key: impl Into<String>) -> Result<Self, CatalogueValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CatalogueValidationError::EmptyField { field: "image" });
        }
        Ok(Self(key))
    }

    /// Storage key as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret an optional stored column, treating blanks as absent.
    pub fn from_optional(key: Option<String>) -> Option<Self> {
        key.and_then(|value| Self::new(value).ok())
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

impl TryFrom<String> for ImageRef {
    type Error = CatalogueValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Supplementary gallery image attached to a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookImage {
    /// Image identifier.
    pub id: i64,
    /// Owning book.
    pub book_id: BookId,
    /// Stored image, if uploaded.
    pub image: Option<ImageRef>,
    /// Caption shown with the image.
    pub description: String,
}

/// A catalogue book with its related entities loaded.
///
/// ## Invariants
/// - `name` is unique across the catalogue.
/// - `volume` and `number_of_pages` are positive.
/// - `translators` may be empty; `authors` normally is not.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Primary key.
    pub id: BookId,
    /// Unique title.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Stored cover image, if uploaded.
    pub cover_image: Option<ImageRef>,
    /// Price in the smallest currency unit.
    pub price: u64,
    /// Whether the book is offered for sale.
    pub active: bool,
    /// Download size in megabytes.
    pub volume: u32,
    /// Page count.
    pub number_of_pages: u32,
    /// Estimated reading time.
    pub approximate_study_time: Duration,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub datetime_modified: DateTime<Utc>,
    /// Linked authors.
    pub authors: Vec<Author>,
    /// Linked translators.
    pub translators: Vec<Translator>,
    /// Publishing house.
    pub publisher: Publisher,
    /// Catalogue category.
    pub category: Category,
    /// Available languages.
    pub languages: Vec<Language>,
    /// Available content formats.
    pub content_formats: Vec<ContentFormat>,
    /// Gallery images.
    pub images: Vec<BookImage>,
}
