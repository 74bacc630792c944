//! User favorites and the per-request favorite set.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::{BookId, UserId};

/// Stored favorite linking a user to a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Primary key.
    pub id: i64,
    /// Owning user.
    pub user_id: UserId,
    /// Favorited book.
    pub book_id: BookId,
    /// Creation timestamp.
    pub datetime_created: DateTime<Utc>,
}

/// Result of toggling a favorite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No favorite existed; this one was created.
    Created(Favorite),
    /// An existing favorite was removed.
    Removed,
}

/// Book ids favorited by one requester, resolved once per request.
///
/// # Examples
/// ```
/// use bookstore::domain::{BookId, FavoriteSet};
///
/// let set = FavoriteSet::from_iter([BookId::new(3)]);
/// assert!(set.contains(BookId::new(3)));
/// assert!(!FavoriteSet::empty().contains(BookId::new(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet(HashSet<BookId>);

impl FavoriteSet {
    /// Set used for anonymous requests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Membership test.
    pub fn contains(&self, book_id: BookId) -> bool {
        self.0.contains(&book_id)
    }

    /// Number of favorited books.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the requester has no favorites.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<BookId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = BookId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
