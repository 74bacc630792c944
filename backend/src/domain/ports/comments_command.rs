//! Driving port for posting comments.

use async_trait::async_trait;

use crate::domain::{BookId, Comment, CommentBody, Error, UserId};

/// Comment write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Submit a comment for moderation.
    async fn post_comment(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: CommentBody,
    ) -> Result<Comment, Error>;
}
