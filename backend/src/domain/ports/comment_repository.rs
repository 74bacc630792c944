//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{BookId, Comment, CommentBody, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The commented book does not exist.
        BookNotFound { book_id: i64 } => "book {book_id} does not exist",
        /// The comment author is unknown to the store.
        UserNotFound { user_id: String } => "user {user_id} does not exist",
    }
}

/// Comment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Approved comments on a book, newest first.
    async fn list_approved(&self, book_id: BookId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Store a new comment in the waiting state.
    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: &CommentBody,
    ) -> Result<Comment, CommentRepositoryError>;
}

/// Fixture repository without comments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentRepository;

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn list_approved(&self, _book_id: BookId) -> Result<Vec<Comment>, CommentRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        _user_id: &UserId,
        book_id: BookId,
        _body: &CommentBody,
    ) -> Result<Comment, CommentRepositoryError> {
        Err(CommentRepositoryError::book_not_found(book_id.get()))
    }
}
