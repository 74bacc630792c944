//! Comments service implementing the comment driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery,
};
use crate::domain::{BookId, Comment, CommentBody, Error, UserId};

/// Comments service over a [`CommentRepository`].
#[derive(Clone)]
pub struct CommentsService<C> {
    comments: Arc<C>,
}

impl<C> CommentsService<C> {
    /// Create a new service with the given repository.
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::BookNotFound { book_id } => {
            Error::not_found(format!("book {book_id} not found"))
        }
        CommentRepositoryError::UserNotFound { .. } => Error::unauthorized("login required"),
    }
}

#[async_trait]
impl<C> CommentsQuery for CommentsService<C>
where
    C: CommentRepository,
{
    async fn list_comments(&self, book_id: BookId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_approved(book_id)
            .await
            .map_err(map_comment_error)
    }
}

#[async_trait]
impl<C> CommentsCommand for CommentsService<C>
where
    C: CommentRepository,
{
    async fn post_comment(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: CommentBody,
    ) -> Result<Comment, Error> {
        let comment = self
            .comments
            .create(user_id, book_id, &body)
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = comment.id, book_id = %book_id, "comment submitted for moderation");
        Ok(comment)
    }
}
