//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the catalogue's driven ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types; filtering and ordering run in SQL, policy stays in the
//!   domain services.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map onto each port's own
//!   error enum.
//!
//! ```ignore
//! use bookstore::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookstore")).await?;
//! let books = DieselBookRepository::new(pool);
//! ```

mod diesel_book_repository;
mod diesel_comment_repository;
mod diesel_favorite_repository;
pub(crate) mod diesel_helpers;
mod diesel_rating_repository;
mod diesel_reference_entity_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use diesel_reference_entity_repository::DieselReferenceEntityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
