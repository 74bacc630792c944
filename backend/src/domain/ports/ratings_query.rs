//! Driving port for reading the requester's ratings.

use async_trait::async_trait;

use crate::domain::{BookId, Error, Rating, UserId};

/// Rating read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsQuery: Send + Sync {
    /// Ratings the user left on a book; other users' ratings are never
    /// returned.
    async fn list_ratings(&self, user_id: &UserId, book_id: BookId) -> Result<Vec<Rating>, Error>;
}
