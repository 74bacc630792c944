//! Driving port for toggling favorites.

use async_trait::async_trait;

use crate::domain::{BookId, Error, ToggleOutcome, UserId};

/// Favorite write use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoritesCommand: Send + Sync {
    /// Remove the favorite when it exists, otherwise create it.
    ///
    /// An unknown book is an invalid request.
    async fn toggle_favorite(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, Error>;
}
