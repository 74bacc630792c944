//! Driving port for the book catalogue listing and detail views.

use async_trait::async_trait;
use pagination::{PageRequest, PageWindow};

use crate::domain::{BookFilter, BookId, BookOrdering, BookRecord, Error, ImageRecord, UserId};

/// Parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBooksRequest {
    /// Composed filter predicate.
    pub filter: BookFilter,
    /// Sort order.
    pub ordering: BookOrdering,
    /// Requested page.
    pub page: PageRequest,
    /// Authenticated requester, if any.
    pub requester: Option<UserId>,
}

/// One page of presentation records.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBooksResponse {
    /// Pagination metadata for the envelope.
    pub window: PageWindow,
    /// Records in display order.
    pub records: Vec<BookRecord>,
}

/// Catalogue read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookCatalogueQuery: Send + Sync {
    /// Filter, sort, paginate and annotate books.
    async fn list_books(&self, request: ListBooksRequest) -> Result<ListBooksResponse, Error>;

    /// Present a single book; not found when it does not exist.
    async fn get_book(
        &self,
        book_id: BookId,
        requester: Option<UserId>,
    ) -> Result<BookRecord, Error>;

    /// Gallery images of a book.
    async fn list_images(&self, book_id: BookId) -> Result<Vec<ImageRecord>, Error>;
}
