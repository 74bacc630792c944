//! Driving port for public comment listings.

use async_trait::async_trait;

use crate::domain::{BookId, Comment, Error};

/// Comment read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Approved comments on a book, newest first.
    async fn list_comments(&self, book_id: BookId) -> Result<Vec<Comment>, Error>;
}
