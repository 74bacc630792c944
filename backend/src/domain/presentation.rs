//! Response records assembled from books, aggregates and the favorite set.
//!
//! The assembler is pure: every input is resolved before it runs, so a page
//! of records costs no extra queries regardless of its size.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ports::BlobUrlResolver;
use super::{
    Author, Book, BookId, BookImage, Category, ContentFormat, FavoriteSet, Language, Publisher,
    RatingAggregate, Score, Translator,
};

/// Gallery image as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Image identifier.
    pub id: i64,
    /// Resolved URL, or `null` when no file was uploaded.
    pub image: Option<String>,
    /// Caption.
    pub description: String,
}

impl ImageRecord {
    /// Resolve a stored image through the blob resolver.
    pub fn present(image: BookImage, blobs: &dyn BlobUrlResolver) -> Self {
        Self {
            id: image.id,
            image: image.image.as_ref().map(|key| blobs.resolve(key)),
            description: image.description,
        }
    }
}

/// One book in a listing or detail response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    /// Primary key.
    pub id: BookId,
    /// Unique title.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Resolved cover URL.
    pub cover_image: Option<String>,
    /// Gallery images.
    pub images: Vec<ImageRecord>,
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
    /// Price in the smallest currency unit.
    pub price: u64,
    /// Whether the book is on sale.
    pub active: bool,
    /// Download size in megabytes.
    pub volume: u32,
    /// Page count.
    pub number_of_pages: u32,
    /// Estimated reading time in whole seconds.
    pub approximate_study_time: u64,
    /// Publication date.
    pub publication_date: NaiveDate,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub datetime_modified: DateTime<Utc>,
    /// Mean score, `null` without ratings.
    pub avg_rating: Option<f64>,
    /// Number of ratings.
    pub rating_count: u64,
    /// The requester's own score.
    pub my_rating: Option<Score>,
    /// Whether the requester favorited this book.
    pub is_favorited: bool,
}

/// Per-request presentation context.
///
/// `is_favorited` is only ever true for authenticated requests, even if a
/// non-empty favorite set is supplied for an anonymous one.
pub struct BookPresenter<'a> {
    blobs: &'a dyn BlobUrlResolver,
    favorites: &'a FavoriteSet,
    authenticated: bool,
}

impl<'a> BookPresenter<'a> {
    /// Build a presenter for one request.
    pub fn new(blobs: &'a dyn BlobUrlResolver, favorites: &'a FavoriteSet, authenticated: bool) -> Self {
        Self {
            blobs,
            favorites,
            authenticated,
        }
    }

    /// Merge a book with its aggregate into a response record.
    pub fn present(&self, book: Book, aggregate: RatingAggregate) -> BookRecord {
        let is_favorited = self.authenticated && self.favorites.contains(book.id);
        let my_rating = if self.authenticated {
            aggregate.my_rating
        } else {
            None
        };
        BookRecord {
            id: book.id,
            cover_image: book.cover_image.as_ref().map(|key| self.blobs.resolve(key)),
            images: book
                .images
                .into_iter()
                .map(|image| ImageRecord::present(image, self.blobs))
                .collect(),
            name: book.name,
            description: book.description,
            authors: book.authors,
            translators: book.translators,
            publisher: book.publisher,
            category: book.category,
            languages: book.languages,
            content_formats: book.content_formats,
            price: book.price,
            active: book.active,
            volume: book.volume,
            number_of_pages: book.number_of_pages,
            approximate_study_time: book.approximate_study_time.as_secs(),
            publication_date: book.publication_date,
            datetime_created: book.datetime_created,
            datetime_modified: book.datetime_modified,
            avg_rating: aggregate.avg_rating,
            rating_count: aggregate.rating_count,
            my_rating,
            is_favorited,
        }
    }
}
