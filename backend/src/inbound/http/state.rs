//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::num::NonZeroU32;
use std::sync::Arc;

use pagination::{PageSizePolicy, PaginationError};

use crate::domain::ports::{
    BookCatalogueQuery, CommentsCommand, CommentsQuery, FavoritesCommand, FavoritesQuery,
    LoginService, RatingsCommand, RatingsQuery,
};

/// Default number of books per listing page.
pub const BOOKS_PAGE_SIZE: u32 = 10;
/// Default number of favorites per listing page.
pub const FAVORITES_PAGE_SIZE: u32 = 5;
/// Upper bound on client-requested page sizes.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Page size policies for the paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePolicies {
    pub books: PageSizePolicy,
    pub favorites: PageSizePolicy,
}

impl PagePolicies {
    /// Build both policies sharing one maximum.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPolicy`] when a size is zero or a
    /// default exceeds `max_size`.
    pub fn new(
        books_default: u32,
        favorites_default: u32,
        max_size: u32,
    ) -> Result<Self, PaginationError> {
        Ok(Self {
            books: policy(books_default, max_size)?,
            favorites: policy(favorites_default, max_size)?,
        })
    }

    /// Policies with the stock defaults (books 10, favorites 5, max 50).
    pub fn standard() -> Result<Self, PaginationError> {
        Self::new(BOOKS_PAGE_SIZE, FAVORITES_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

fn policy(default_size: u32, max_size: u32) -> Result<PageSizePolicy, PaginationError> {
    let invalid = || PaginationError::InvalidPolicy {
        default: default_size,
        max: max_size,
    };
    let default_size = NonZeroU32::new(default_size).ok_or_else(invalid)?;
    let max_size = NonZeroU32::new(max_size).ok_or_else(invalid)?;
    PageSizePolicy::new(default_size, max_size)
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub catalogue: Arc<dyn BookCatalogueQuery>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
    pub ratings: Arc<dyn RatingsCommand>,
    pub ratings_query: Arc<dyn RatingsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub catalogue: Arc<dyn BookCatalogueQuery>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
    pub ratings: Arc<dyn RatingsCommand>,
    pub ratings_query: Arc<dyn RatingsQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub pages: PagePolicies,
}

impl HttpState {
    /// Assemble the state from its ports and page policies.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookstore::domain::ports::FixtureLoginService;
    /// use bookstore::domain::{BookCatalogueService, CommentsService, FavoritesService, RatingsService};
    /// use bookstore::inbound::http::state::{HttpState, HttpStatePorts, PagePolicies};
    /// use bookstore::outbound::blob::BaseUrlBlobResolver;
    /// use bookstore::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let blobs = Arc::new(BaseUrlBlobResolver::new("http://localhost/media/").expect("base"));
    /// let favorites = Arc::new(FavoritesService::new(store.clone()));
    /// let ratings = Arc::new(RatingsService::new(store.clone()));
    /// let comments = Arc::new(CommentsService::new(store.clone()));
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(FixtureLoginService),
    ///         catalogue: Arc::new(BookCatalogueService::new(
    ///             store.clone(),
    ///             store.clone(),
    ///             store,
    ///             blobs,
    ///         )),
    ///         favorites: favorites.clone(),
    ///         favorites_query: favorites,
    ///         ratings: ratings.clone(),
    ///         ratings_query: ratings,
    ///         comments: comments.clone(),
    ///         comments_query: comments,
    ///     },
    ///     PagePolicies::standard().expect("stock policies"),
    /// );
    /// assert_eq!(state.pages.books.default_size(), 10);
    /// ```
    pub fn new(ports: HttpStatePorts, pages: PagePolicies) -> Self {
        let HttpStatePorts {
            login,
            catalogue,
            favorites,
            favorites_query,
            ratings,
            ratings_query,
            comments,
            comments_query,
        } = ports;
        Self {
            login,
            catalogue,
            favorites,
            favorites_query,
            ratings,
            ratings_query,
            comments,
            comments_query,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn standard_policies_use_endpoint_defaults() {
        let pages = PagePolicies::standard().expect("stock policies");
        assert_eq!(pages.books.default_size(), BOOKS_PAGE_SIZE);
        assert_eq!(pages.favorites.default_size(), FAVORITES_PAGE_SIZE);
        assert_eq!(pages.books.max_size(), MAX_PAGE_SIZE);
        assert_eq!(pages.favorites.max_size(), MAX_PAGE_SIZE);
    }

    #[rstest]
    #[case(0, 5, 50)]
    #[case(10, 5, 0)]
    #[case(60, 5, 50)]
    fn invalid_sizes_are_rejected(#[case] books: u32, #[case] favorites: u32, #[case] max: u32) {
        let error = PagePolicies::new(books, favorites, max).expect_err("invalid policy");
        assert!(matches!(error, PaginationError::InvalidPolicy { .. }));
    }
}
