//! Port for rating persistence and grouped rating statistics.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{BookId, Rating, RatingSummary, Score, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating repository adapters.
    pub enum RatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rating repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rating repository query failed: {message}",
        /// The rated book does not exist.
        BookNotFound { book_id: i64 } => "book {book_id} does not exist",
        /// The rating author is unknown to the store.
        UserNotFound { user_id: String } => "user {user_id} does not exist",
        /// The user already rated this book.
        Duplicate => "rating already exists for this user and book",
    }
}

/// Rating storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Average and count per book in one grouped query.
    ///
    /// Books without ratings are absent from the map.
    async fn summaries(
        &self,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, RatingSummary>, RatingRepositoryError>;

    /// The given user's scores for the given books in one query.
    async fn scores_by(
        &self,
        user_id: &UserId,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, Score>, RatingRepositoryError>;

    /// Ratings the user left on one book.
    async fn list_for(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<Vec<Rating>, RatingRepositoryError>;

    /// Insert a rating.
    ///
    /// The duplicate check and the insert run atomically; a unique-constraint
    /// violation is reported as [`RatingRepositoryError::Duplicate`].
    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        score: Score,
    ) -> Result<Rating, RatingRepositoryError>;
}

/// Fixture repository with no ratings; creation always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRatingRepository;

#[async_trait]
impl RatingRepository for FixtureRatingRepository {
    async fn summaries(
        &self,
        _book_ids: &[BookId],
    ) -> Result<HashMap<BookId, RatingSummary>, RatingRepositoryError> {
        Ok(HashMap::new())
    }

    async fn scores_by(
        &self,
        _user_id: &UserId,
        _book_ids: &[BookId],
    ) -> Result<HashMap<BookId, Score>, RatingRepositoryError> {
        Ok(HashMap::new())
    }

    async fn list_for(
        &self,
        _user_id: &UserId,
        _book_id: BookId,
    ) -> Result<Vec<Rating>, RatingRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        _user_id: &UserId,
        book_id: BookId,
        _score: Score,
    ) -> Result<Rating, RatingRepositoryError> {
        Err(RatingRepositoryError::book_not_found(book_id.get()))
    }
}
