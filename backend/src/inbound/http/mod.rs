//! HTTP inbound adapter exposing REST endpoints.
//!
//! Each resource registers only the operations it supports: books and their
//! images are read-only, comments and ratings are list/create, favorites are
//! list/toggle. Anything else falls through to the router's 404/405.

use actix_web::web;

pub mod books;
pub mod comments;
pub mod error;
pub mod favorites;
pub mod health;
pub mod ratings;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` endpoint on `cfg`.
///
/// The caller owns the scope, session middleware and shared state.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use bookstore::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .service(users::login)
        .service(books::list_books)
        .service(books::get_book)
        .service(books::list_images)
        .service(comments::list_comments)
        .service(comments::create_comment)
        .service(ratings::list_ratings)
        .service(ratings::create_rating)
        .service(favorites::list_favorites)
        .service(favorites::toggle_favorite);
}
