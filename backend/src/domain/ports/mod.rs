//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the blob resolver) return their own error
//! enums; driving ports (queries, commands, login) return the domain
//! [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod blob_url_resolver;
mod book_catalogue_query;
mod book_repository;
mod comment_repository;
mod comments_command;
mod comments_query;
mod favorite_repository;
mod favorites_command;
mod favorites_query;
mod login_service;
mod rating_repository;
mod ratings_command;
mod ratings_query;
mod reference_entity_repository;
mod user_repository;

pub use blob_url_resolver::{BlobUrlResolver, FixtureBlobUrlResolver};
#[cfg(test)]
pub use book_catalogue_query::MockBookCatalogueQuery;
pub use book_catalogue_query::{BookCatalogueQuery, ListBooksRequest, ListBooksResponse};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{
    BookRepository, BookRepositoryError, BookSlice, FixtureBookRepository,
};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{
    CommentRepository, CommentRepositoryError, FixtureCommentRepository,
};
pub use comments_command::CommentsCommand;
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{
    FavoriteRepository, FavoriteRepositoryError, FavoriteSlice, FixtureFavoriteRepository,
};
pub use favorites_command::FavoritesCommand;
#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
#[cfg(test)]
pub use favorites_query::MockFavoritesQuery;
pub use favorites_query::{FavoritesQuery, ListFavoritesResponse};
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
pub use rating_repository::{FixtureRatingRepository, RatingRepository, RatingRepositoryError};
#[cfg(test)]
pub use ratings_command::MockRatingsCommand;
pub use ratings_command::RatingsCommand;
#[cfg(test)]
pub use ratings_query::MockRatingsQuery;
pub use ratings_query::RatingsQuery;
#[cfg(test)]
pub use reference_entity_repository::MockReferenceEntityRepository;
pub use reference_entity_repository::{ReferenceEntityRepository, ReferenceEntityRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
