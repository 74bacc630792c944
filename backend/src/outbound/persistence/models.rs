//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    authors, book_images, books, categories, comments, content_formats, favorites, languages,
    publishers, ratings, translators, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

/// Insertable struct for creating or refreshing user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
}

// ---------------------------------------------------------------------------
// Catalogue models
// ---------------------------------------------------------------------------

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub price: i64,
    pub active: bool,
    pub volume: i32,
    pub number_of_pages: i32,
    pub approximate_study_time: i64,
    pub publication_date: NaiveDate,
    pub datetime_created: DateTime<Utc>,
    pub datetime_modified: DateTime<Utc>,
    pub publisher_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub biography: String,
    pub datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = translators)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TranslatorRow {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = publishers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PublisherRow {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = languages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LanguageRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_formats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentFormatRow {
    pub id: i64,
    pub name: String,
}

/// Row struct for reading from the book_images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = book_images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookImageRow {
    pub id: i64,
    pub book_id: i64,
    pub image: Option<String>,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Reader interaction models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub book_id: i64,
    pub body: String,
    pub status: String,
    pub datetime_created: DateTime<Utc>,
}

/// Insertable struct for new comments; the status defaults to waiting.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub user_id: Uuid,
    pub book_id: i64,
    pub body: &'a str,
    pub status: &'a str,
}

/// Row struct for reading from the favorites table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub id: i64,
    pub user_id: Uuid,
    pub book_id: i64,
    pub datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub user_id: Uuid,
    pub book_id: i64,
}

/// Row struct for reading from the ratings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RatingRow {
    pub id: i64,
    pub book_id: i64,
    pub score: i16,
    pub datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ratings)]
pub(crate) struct NewRatingRow {
    pub user_id: Uuid,
    pub book_id: i64,
    pub score: i16,
}
