//! Port for favorite persistence.

use async_trait::async_trait;

use crate::domain::{BookId, Favorite, FavoriteSet, ToggleOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
        /// The referenced book does not exist.
        BookNotFound { book_id: i64 } => "book {book_id} does not exist",
        /// The favorite owner is unknown to the store.
        UserNotFound { user_id: String } => "user {user_id} does not exist",
    }
}

/// One page of a user's favorites, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSlice {
    /// Total favorites owned by the user.
    pub count: u64,
    /// Favorites in the requested slice.
    pub favorites: Vec<Favorite>,
}

/// Favorite storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Every book id the user has favorited, in one query.
    async fn favorite_set(&self, user_id: &UserId) -> Result<FavoriteSet, FavoriteRepositoryError>;

    /// Count the user's favorites and load one slice, newest first.
    async fn slice_for(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<FavoriteSlice, FavoriteRepositoryError>;

    /// Delete the favorite if present, otherwise create it, atomically.
    async fn toggle(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, FavoriteRepositoryError>;
}

/// Fixture repository where nobody has favorites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn favorite_set(&self, _user_id: &UserId) -> Result<FavoriteSet, FavoriteRepositoryError> {
        Ok(FavoriteSet::empty())
    }

    async fn slice_for(
        &self,
        _user_id: &UserId,
        _offset: u64,
        _limit: u64,
    ) -> Result<FavoriteSlice, FavoriteRepositoryError> {
        Ok(FavoriteSlice::default())
    }

    async fn toggle(
        &self,
        _user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, FavoriteRepositoryError> {
        Err(FavoriteRepositoryError::book_not_found(book_id.get()))
    }
}
