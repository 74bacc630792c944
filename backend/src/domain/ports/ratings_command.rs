//! Driving port for rating books.

use async_trait::async_trait;

use crate::domain::{BookId, Error, Rating, Score, UserId};

/// Rating write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsCommand: Send + Sync {
    /// Rate a book once. A second rating by the same user is an invalid
    /// request; a missing book is not found.
    async fn rate_book(&self, user_id: &UserId, book_id: BookId, score: Score)
    -> Result<Rating, Error>;
}
