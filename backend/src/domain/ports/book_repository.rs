//! Port for reading books from the entity store.
//!
//! Adapters evaluate the [`BookFilter`] and [`BookOrdering`] themselves so that
//! filtering, counting and slicing happen close to the data. Count and slice
//! must observe the same snapshot.

use async_trait::async_trait;

use crate::domain::{Book, BookFilter, BookId, BookImage, BookOrdering};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "book repository query failed: {message}",
    }
}

/// Total match count plus one ordered slice of matching books.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookSlice {
    /// Number of books matching the filter, ignoring the slice bounds.
    pub count: u64,
    /// Books in `[offset, offset + limit)` under the requested ordering.
    pub books: Vec<Book>,
}

/// Read access to the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Count matching books and load one ordered slice of them.
    ///
    /// Each book appears at most once regardless of how many related rows
    /// match. A slice past the end is empty, not an error.
    async fn query_books(
        &self,
        filter: &BookFilter,
        ordering: &BookOrdering,
        offset: u64,
        limit: u64,
    ) -> Result<BookSlice, BookRepositoryError>;

    /// Load one book with its relations.
    async fn find_book(&self, book_id: BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Gallery images of a book; empty when the book does not exist.
    async fn list_images(&self, book_id: BookId) -> Result<Vec<BookImage>, BookRepositoryError>;
}

/// Fixture repository with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookRepository;

#[async_trait]
impl BookRepository for FixtureBookRepository {
    async fn query_books(
        &self,
        _filter: &BookFilter,
        _ordering: &BookOrdering,
        _offset: u64,
        _limit: u64,
    ) -> Result<BookSlice, BookRepositoryError> {
        Ok(BookSlice::default())
    }

    async fn find_book(&self, _book_id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(None)
    }

    async fn list_images(&self, _book_id: BookId) -> Result<Vec<BookImage>, BookRepositoryError> {
        Ok(Vec::new())
    }
}
