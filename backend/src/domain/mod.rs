//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed catalogue entities and the use-cases the
//! HTTP adapter drives. Types are immutable data; persistence and blob
//! storage sit behind the traits in [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - Catalogue types (`Book`, `BookFilter`, `BookOrdering`, ...).
//! - Community types (`Comment`, `Favorite`, `Rating`).
//! - `BookRecord`: the presentation record returned by listings.
//! - Services implementing the driving ports.

pub mod auth;
pub mod catalogue;
pub mod comments;
pub mod error;
pub mod favorites;
pub mod ports;
pub mod presentation;
pub mod ratings;
pub mod trace_id;
pub mod user;

mod book_catalogue_service;
mod comments_service;
mod favorites_service;
mod login_service;
mod ratings_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::book_catalogue_service::BookCatalogueService;
pub use self::catalogue::{
    Author, Book, BookFilter, BookId, BookImage, BookOrdering, CatalogueValidationError,
    Category, ContentFormat, FILTER_KEYS, ImageExtension, ImageRef, Language, ORDERING_PARAM,
    OrderDirection, OrderField, Publisher, Translator, book_image_path, cover_image_path,
};
pub use self::comments::{Comment, CommentBody, CommentStatus, CommentValidationError};
pub use self::comments_service::CommentsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::favorites::{Favorite, FavoriteSet, ToggleOutcome};
pub use self::favorites_service::FavoritesService;
pub use self::login_service::ConfiguredLoginService;
pub use self::presentation::{BookPresenter, BookRecord, ImageRecord};
pub use self::ratings::{
    Rating, RatingAggregate, RatingSummary, RatingValidationError, SCORE_MAX, SCORE_MIN, Score,
};
pub use self::ratings_service::RatingsService;
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
