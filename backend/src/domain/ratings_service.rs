//! Ratings service implementing the rating driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{RatingRepository, RatingRepositoryError, RatingsCommand, RatingsQuery};
use crate::domain::{BookId, Error, Rating, Score, UserId};

/// Message returned when a user rates the same book twice.
const DUPLICATE_RATING: &str = "You have already rated this book.";

/// Ratings service over a [`RatingRepository`].
#[derive(Clone)]
pub struct RatingsService<R> {
    ratings: Arc<R>,
}

impl<R> RatingsService<R> {
    /// Create a new service with the given repository.
    pub fn new(ratings: Arc<R>) -> Self {
        Self { ratings }
    }
}

fn map_rating_error(error: RatingRepositoryError) -> Error {
    match error {
        RatingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rating repository unavailable: {message}"))
        }
        RatingRepositoryError::Query { message } => {
            Error::internal(format!("rating repository error: {message}"))
        }
        RatingRepositoryError::BookNotFound { book_id } => {
            Error::not_found(format!("book {book_id} not found"))
        }
        RatingRepositoryError::UserNotFound { .. } => Error::unauthorized("login required"),
        RatingRepositoryError::Duplicate => Error::invalid_request(DUPLICATE_RATING)
            .with_details(json!({ "field": "non_field_errors", "code": "unique" })),
    }
}

#[async_trait]
impl<R> RatingsQuery for RatingsService<R>
where
    R: RatingRepository,
{
    async fn list_ratings(&self, user_id: &UserId, book_id: BookId) -> Result<Vec<Rating>, Error> {
        self.ratings
            .list_for(user_id, book_id)
            .await
            .map_err(map_rating_error)
    }
}

#[async_trait]
impl<R> RatingsCommand for RatingsService<R>
where
    R: RatingRepository,
{
    async fn rate_book(
        &self,
        user_id: &UserId,
        book_id: BookId,
        score: Score,
    ) -> Result<Rating, Error> {
        let rating = self
            .ratings
            .create(user_id, book_id, score)
            .await
            .map_err(map_rating_error)?;
        info!(user_id = %user_id, book_id = %book_id, score = score.get(), "book rated");
        Ok(rating)
    }
}
