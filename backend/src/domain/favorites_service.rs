//! Favorites service implementing the favorite driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, FavoritesCommand, FavoritesQuery,
    ListFavoritesResponse,
};
use crate::domain::{BookId, Error, ToggleOutcome, UserId};

/// Favorites service over a [`FavoriteRepository`].
#[derive(Clone)]
pub struct FavoritesService<F> {
    favorites: Arc<F>,
}

impl<F> FavoritesService<F> {
    /// Create a new service with the given repository.
    pub fn new(favorites: Arc<F>) -> Self {
        Self { favorites }
    }
}

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
        FavoriteRepositoryError::BookNotFound { book_id } => Error::invalid_request(format!(
            "Invalid pk \"{book_id}\" - object does not exist."
        ))
        .with_details(json!({ "field": "book", "code": "does_not_exist" })),
        FavoriteRepositoryError::UserNotFound { .. } => Error::unauthorized("login required"),
    }
}

#[async_trait]
impl<F> FavoritesQuery for FavoritesService<F>
where
    F: FavoriteRepository,
{
    async fn list_favorites(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<ListFavoritesResponse, Error> {
        let slice = self
            .favorites
            .slice_for(user_id, page.offset(), page.limit())
            .await
            .map_err(map_favorite_error)?;
        let window = page.window(slice.count)?;
        Ok(ListFavoritesResponse {
            window,
            favorites: slice.favorites,
        })
    }
}

#[async_trait]
impl<F> FavoritesCommand for FavoritesService<F>
where
    F: FavoriteRepository,
{
    async fn toggle_favorite(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, Error> {
        let outcome = self
            .favorites
            .toggle(user_id, book_id)
            .await
            .map_err(map_favorite_error)?;
        let created = matches!(outcome, ToggleOutcome::Created(_));
        info!(user_id = %user_id, book_id = %book_id, created, "favorite toggled");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FavoriteSlice, MockFavoriteRepository};
    use crate::domain::{ErrorCode, Favorite};
    use crate::test_support::{at, page_request};
    use rstest::rstest;

    fn favorite(id: i64, user_id: &UserId) -> Favorite {
        Favorite {
            id,
            user_id: user_id.clone(),
            book_id: BookId::new(id),
            datetime_created: at(id),
        }
    }

    fn service(repo: MockFavoriteRepository) -> FavoritesService<MockFavoriteRepository> {
        FavoritesService::new(Arc::new(repo))
    }

    #[rstest]
    #[case(1, 5, 0)]
    #[case(2, 5, 5)]
    #[case(3, 2, 10)]
    #[tokio::test]
    async fn pages_use_the_request_offset(
        #[case] page: u64,
        #[case] rows: i64,
        #[case] offset: u64,
    ) {
        let user = UserId::random();
        let owned = user.clone();
        let mut repo = MockFavoriteRepository::new();
        repo.expect_slice_for()
            .withf(move |_, got_offset, limit| *got_offset == offset && *limit == 5)
            .times(1)
            .return_once(move |_, _, _| {
                Ok(FavoriteSlice {
                    count: 12,
                    favorites: (1..=rows).map(|id| favorite(id, &owned)).collect(),
                })
            });

        let response = service(repo)
            .list_favorites(&user, page_request(page, 5, 5))
            .await
            .expect("favorites page");

        assert_eq!(response.window.pages(), 3);
        assert_eq!(response.window.has_previous(), page > 1);
        assert_eq!(response.window.has_next(), page < 3);
        assert_eq!(response.favorites.len(), usize::try_from(rows).expect("row count"));
    }

    #[tokio::test]
    async fn unknown_book_is_a_field_error() {
        let mut repo = MockFavoriteRepository::new();
        repo.expect_toggle()
            .times(1)
            .return_once(|_, book_id| Err(FavoriteRepositoryError::book_not_found(book_id.get())));

        let error = service(repo)
            .toggle_favorite(&UserId::random(), BookId::new(404))
            .await
            .expect_err("unknown book");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Invalid pk \"404\" - object does not exist.");
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "book", "code": "does_not_exist" }))
        );
    }

    #[tokio::test]
    async fn unknown_owner_requires_login() {
        let mut repo = MockFavoriteRepository::new();
        repo.expect_toggle()
            .times(1)
            .return_once(|user_id, _| {
                Err(FavoriteRepositoryError::user_not_found(user_id.to_string()))
            });

        let error = service(repo)
            .toggle_favorite(&UserId::random(), BookId::new(1))
            .await
            .expect_err("stale session");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "login required");
    }

    #[tokio::test]
    async fn toggle_passes_outcome_through() {
        let user = UserId::random();
        let created = favorite(7, &user);
        let expected = ToggleOutcome::Created(created.clone());
        let mut repo = MockFavoriteRepository::new();
        repo.expect_toggle()
            .times(1)
            .return_once(move |_, _| Ok(ToggleOutcome::Created(created)));

        let outcome = service(repo)
            .toggle_favorite(&user, BookId::new(7))
            .await
            .expect("toggle");
        assert_eq!(outcome, expected);
    }
}
