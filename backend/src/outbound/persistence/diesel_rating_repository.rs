//! PostgreSQL-backed `RatingRepository` implementation using Diesel ORM.
//!
//! Rating statistics for a page come from one grouped query; creation checks
//! the book, the user and an existing rating inside the insert transaction,
//! and the `(user_id, book_id)` unique index settles concurrent inserts.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::{count, exists, sql};
use diesel::prelude::*;
use diesel::sql_types::{Double, Nullable};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RatingRepository, RatingRepositoryError};
use crate::domain::{BookId, Rating, RatingSummary, Score, User, UserId, Username};

use super::diesel_helpers::{
    ConstraintViolation, TxError, collect_rows, constraint_violation, map_basic_diesel_error,
    map_pool_error_message, non_negative,
};
use super::models::{NewRatingRow, RatingRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{books, ratings, users};

/// Diesel-backed implementation of the `RatingRepository` port.
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RatingRepositoryError {
    RatingRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> RatingRepositoryError {
    map_basic_diesel_error(
        error,
        RatingRepositoryError::query,
        RatingRepositoryError::connection,
    )
}

/// Map insert failures, treating integrity violations as the domain errors
/// the pre-checks would have produced.
fn map_insert_error(error: diesel::result::Error, book_id: BookId) -> RatingRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique) => RatingRepositoryError::duplicate(),
        Some(ConstraintViolation::ForeignKey) => {
            RatingRepositoryError::book_not_found(book_id.get())
        }
        None => map_diesel_error(error),
    }
}

fn raw_ids(book_ids: &[BookId]) -> Vec<i64> {
    book_ids.iter().map(|id| id.get()).collect()
}

fn row_to_score(score: i16) -> Result<Score, String> {
    Score::new(i64::from(score)).map_err(|err| err.to_string())
}

fn row_to_user(row: UserRow) -> Result<User, String> {
    let username = Username::new(&row.username).map_err(|err| err.to_string())?;
    Ok(User::new(UserId::from_uuid(row.id), username))
}

fn row_to_rating((rating, user): (RatingRow, UserRow)) -> Result<Rating, String> {
    Ok(Rating {
        id: rating.id,
        user: row_to_user(user)?,
        book_id: BookId::new(rating.book_id),
        score: row_to_score(rating.score)?,
        datetime_created: rating.datetime_created,
    })
}

/// Insert a rating after checking its book, its user and any earlier rating.
async fn insert_rating(
    conn: &mut AsyncPgConnection,
    user_id: &UserId,
    book_id: BookId,
    score: Score,
) -> Result<(RatingRow, UserRow), TxError<RatingRepositoryError>> {
    let book_exists: bool =
        diesel::select(exists(books::table.filter(books::id.eq(book_id.get()))))
            .get_result(conn)
            .await?;
    if !book_exists {
        return Err(TxError::Rejected(RatingRepositoryError::book_not_found(
            book_id.get(),
        )));
    }

    let user: Option<UserRow> = users::table
        .find(*user_id.as_uuid())
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(user) = user else {
        return Err(TxError::Rejected(RatingRepositoryError::user_not_found(
            user_id.to_string(),
        )));
    };

    let already_rated: bool = diesel::select(exists(
        ratings::table
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .filter(ratings::book_id.eq(book_id.get())),
    ))
    .get_result(conn)
    .await?;
    if already_rated {
        return Err(TxError::Rejected(RatingRepositoryError::duplicate()));
    }

    let row: RatingRow = diesel::insert_into(ratings::table)
        .values(&NewRatingRow {
            user_id: *user_id.as_uuid(),
            book_id: book_id.get(),
            score: i16::from(score.get()),
        })
        .returning(RatingRow::as_returning())
        .get_result(conn)
        .await?;
    Ok((row, user))
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn summaries(
        &self,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, RatingSummary>, RatingRepositoryError> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i64, Option<f64>, i64)> = ratings::table
            .filter(ratings::book_id.eq_any(raw_ids(book_ids)))
            .group_by(ratings::book_id)
            .select((
                ratings::book_id,
                sql::<Nullable<Double>>("AVG(ratings.score)::float8"),
                count(ratings::id),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let summaries = collect_rows(
            rows.into_iter().map(|(book_id, avg, total)| {
                let rating_count = non_negative(total, "count(ratings)")?;
                let avg_rating =
                    avg.ok_or_else(|| format!("book {book_id} has ratings but no average"))?;
                Ok((
                    BookId::new(book_id),
                    RatingSummary {
                        avg_rating,
                        rating_count,
                    },
                ))
            }),
            RatingRepositoryError::query,
        )?;
        Ok(summaries.into_iter().collect())
    }

    async fn scores_by(
        &self,
        user_id: &UserId,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, Score>, RatingRepositoryError> {
        if book_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i64, i16)> = ratings::table
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .filter(ratings::book_id.eq_any(raw_ids(book_ids)))
            .select((ratings::book_id, ratings::score))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let scores = collect_rows(
            rows.into_iter()
                .map(|(book_id, score)| Ok((BookId::new(book_id), row_to_score(score)?))),
            RatingRepositoryError::query,
        )?;
        Ok(scores.into_iter().collect())
    }

    async fn list_for(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<Vec<Rating>, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(RatingRow, UserRow)> = ratings::table
            .inner_join(users::table)
            .filter(ratings::user_id.eq(user_id.as_uuid()))
            .filter(ratings::book_id.eq(book_id.get()))
            .select((RatingRow::as_select(), UserRow::as_select()))
            .order_by((ratings::datetime_created.desc(), ratings::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(row_to_rating), RatingRepositoryError::query)
    }

    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        score: Score,
    ) -> Result<Rating, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = conn
            .transaction(|conn| insert_rating(conn, user_id, book_id, score).scope_boxed())
            .await
            .map_err(|error| error.resolve(|error| map_insert_error(error, book_id)))?;
        debug!(book_id = %book_id, "rating row inserted");
        row_to_rating(rows).map_err(RatingRepositoryError::query)
    }
}
