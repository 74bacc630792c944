//! Driving port for listing a user's favorites.

use async_trait::async_trait;
use pagination::{PageRequest, PageWindow};

use crate::domain::{Error, Favorite, UserId};

/// One page of favorites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFavoritesResponse {
    /// Pagination metadata for the envelope.
    pub window: PageWindow,
    /// Favorites, newest first.
    pub favorites: Vec<Favorite>,
}

/// Favorite read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesQuery: Send + Sync {
    /// Page through the user's favorites.
    async fn list_favorites(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<ListFavoritesResponse, Error>;
}
