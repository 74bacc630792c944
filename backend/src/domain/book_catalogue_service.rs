//! Catalogue query service.
//!
//! Runs the listing pipeline: filter and slice from the book store, annotate
//! the slice with rating aggregates, resolve the requester's favorite set
//! once, and assemble presentation records. The number of store round trips
//! is fixed per request and does not grow with the page size.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    BlobUrlResolver, BookCatalogueQuery, BookRepository, BookRepositoryError, FavoriteRepository,
    FavoriteRepositoryError, ListBooksRequest, ListBooksResponse, RatingRepository,
    RatingRepositoryError,
};
use crate::domain::{
    Book, BookId, BookPresenter, BookRecord, Error, FavoriteSet, ImageRecord, RatingAggregate,
    UserId,
};

/// Catalogue service implementing [`BookCatalogueQuery`].
#[derive(Clone)]
pub struct BookCatalogueService<B, R, F> {
    books: Arc<B>,
    ratings: Arc<R>,
    favorites: Arc<F>,
    blobs: Arc<dyn BlobUrlResolver>,
}

impl<B, R, F> BookCatalogueService<B, R, F> {
    /// Create a new service with the given repositories.
    pub fn new(
        books: Arc<B>,
        ratings: Arc<R>,
        favorites: Arc<F>,
        blobs: Arc<dyn BlobUrlResolver>,
    ) -> Self {
        Self {
            books,
            ratings,
            favorites,
            blobs,
        }
    }
}

fn map_book_error(error: BookRepositoryError) -> Error {
    match error {
        BookRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("book repository unavailable: {message}"))
        }
        BookRepositoryError::Query { message } => {
            Error::internal(format!("book repository error: {message}"))
        }
    }
}

fn map_rating_error(error: RatingRepositoryError) -> Error {
    match error {
        RatingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rating repository unavailable: {message}"))
        }
        other => Error::internal(format!("rating repository error: {other}")),
    }
}

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        other => Error::internal(format!("favorite repository error: {other}")),
    }
}

impl<B, R, F> BookCatalogueService<B, R, F>
where
    B: BookRepository,
    R: RatingRepository,
    F: FavoriteRepository,
{
    /// Rating aggregates for a slice: one grouped query plus, for
    /// authenticated requests, one requester-scoped query.
    async fn annotate(
        &self,
        book_ids: &[BookId],
        requester: Option<&UserId>,
    ) -> Result<HashMap<BookId, RatingAggregate>, Error> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let summaries = self
            .ratings
            .summaries(book_ids)
            .await
            .map_err(map_rating_error)?;
        let mut mine = match requester {
            Some(user_id) => self
                .ratings
                .scores_by(user_id, book_ids)
                .await
                .map_err(map_rating_error)?,
            None => HashMap::new(),
        };
        Ok(book_ids
            .iter()
            .map(|id| {
                let aggregate =
                    RatingAggregate::merge(summaries.get(id).copied(), mine.remove(id));
                (*id, aggregate)
            })
            .collect())
    }

    async fn favorite_set(&self, requester: Option<&UserId>) -> Result<FavoriteSet, Error> {
        match requester {
            Some(user_id) => self
                .favorites
                .favorite_set(user_id)
                .await
                .map_err(map_favorite_error),
            None => Ok(FavoriteSet::empty()),
        }
    }

    async fn present_all(
        &self,
        books: Vec<Book>,
        requester: Option<&UserId>,
    ) -> Result<Vec<BookRecord>, Error> {
        let ids: Vec<BookId> = books.iter().map(|book| book.id).collect();
        let mut aggregates = self.annotate(&ids, requester).await?;
        let favorites = self.favorite_set(requester).await?;
        let presenter = BookPresenter::new(self.blobs.as_ref(), &favorites, requester.is_some());
        Ok(books
            .into_iter()
            .map(|book| {
                let aggregate = aggregates.remove(&book.id).unwrap_or_default();
                presenter.present(book, aggregate)
            })
            .collect())
    }
}

#[async_trait]
impl<B, R, F> BookCatalogueQuery for BookCatalogueService<B, R, F>
where
    B: BookRepository,
    R: RatingRepository,
    F: FavoriteRepository,
{
    async fn list_books(&self, request: ListBooksRequest) -> Result<ListBooksResponse, Error> {
        let ListBooksRequest {
            filter,
            ordering,
            page,
            requester,
        } = request;
        let slice = self
            .books
            .query_books(&filter, &ordering, page.offset(), page.limit())
            .await
            .map_err(map_book_error)?;
        let window = page.window(slice.count)?;
        debug!(
            count = window.count(),
            page = page.page(),
            rows = slice.books.len(),
            "book slice loaded"
        );
        let records = self.present_all(slice.books, requester.as_ref()).await?;
        Ok(ListBooksResponse { window, records })
    }

    async fn get_book(
        &self,
        book_id: BookId,
        requester: Option<UserId>,
    ) -> Result<BookRecord, Error> {
        let book = self
            .books
            .find_book(book_id)
            .await
            .map_err(map_book_error)?
            .ok_or_else(|| Error::not_found(format!("book {book_id} not found")))?;
        let mut records = self.present_all(vec![book], requester.as_ref()).await?;
        records
            .pop()
            .ok_or_else(|| Error::internal("presenter dropped the requested book"))
    }

    async fn list_images(&self, book_id: BookId) -> Result<Vec<ImageRecord>, Error> {
        let images = self
            .books
            .list_images(book_id)
            .await
            .map_err(map_book_error)?;
        Ok(images
            .into_iter()
            .map(|image| ImageRecord::present(image, self.blobs.as_ref()))
            .collect())
    }
}

#[cfg(test)]
#[path = "book_catalogue_service_tests.rs"]
mod tests;
