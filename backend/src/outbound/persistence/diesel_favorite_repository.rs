//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError, FavoriteSlice};
use crate::domain::{BookId, Favorite, FavoriteSet, ToggleOutcome, UserId};

use super::diesel_helpers::{
    ConstraintViolation, TxError, constraint_violation, map_basic_diesel_error,
    map_pool_error_message, non_negative,
};
use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::{books, favorites, users};

/// Diesel-backed implementation of the `FavoriteRepository` port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoriteRepositoryError {
    FavoriteRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_basic_diesel_error(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
    )
}

/// Foreign key guarding `favorites.user_id`.
const USER_FOREIGN_KEY: &str = "favorites_user_id_fkey";

/// Map an insert that slipped past the existence checks.
///
/// A row deleted between the check and the insert trips a foreign key; the
/// constraint name tells the user apart from the book.
fn map_toggle_error(
    error: diesel::result::Error,
    user_id: &UserId,
    book_id: BookId,
) -> FavoriteRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => {
            let on_user = matches!(
                &error,
                diesel::result::Error::DatabaseError(_, info)
                    if info.constraint_name() == Some(USER_FOREIGN_KEY)
            );
            if on_user {
                FavoriteRepositoryError::user_not_found(user_id.to_string())
            } else {
                FavoriteRepositoryError::book_not_found(book_id.get())
            }
        }
        _ => map_diesel_error(error),
    }
}

fn row_to_favorite(row: FavoriteRow) -> Favorite {
    Favorite {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        book_id: BookId::new(row.book_id),
        datetime_created: row.datetime_created,
    }
}

/// Delete the favorite if present, otherwise create it for a known book and
/// user.
///
/// An insert that loses a race against a concurrent toggle finds the other
/// transaction's row and reports it as created.
async fn toggle_favorite(
    conn: &mut AsyncPgConnection,
    user_id: &UserId,
    book_id: BookId,
) -> Result<Option<FavoriteRow>, TxError<FavoriteRepositoryError>> {
    let mine = favorites::user_id
        .eq(*user_id.as_uuid())
        .and(favorites::book_id.eq(book_id.get()));

    let removed = diesel::delete(favorites::table.filter(mine))
        .execute(conn)
        .await?;
    if removed > 0 {
        return Ok(None);
    }

    let book_exists: bool =
        diesel::select(exists(books::table.filter(books::id.eq(book_id.get()))))
            .get_result(conn)
            .await?;
    if !book_exists {
        return Err(TxError::Rejected(FavoriteRepositoryError::book_not_found(
            book_id.get(),
        )));
    }

    let user_exists: bool =
        diesel::select(exists(users::table.filter(users::id.eq(user_id.as_uuid()))))
            .get_result(conn)
            .await?;
    if !user_exists {
        return Err(TxError::Rejected(FavoriteRepositoryError::user_not_found(
            user_id.to_string(),
        )));
    }

    let inserted: Option<FavoriteRow> = diesel::insert_into(favorites::table)
        .values(&NewFavoriteRow {
            user_id: *user_id.as_uuid(),
            book_id: book_id.get(),
        })
        .on_conflict((favorites::user_id, favorites::book_id))
        .do_nothing()
        .returning(FavoriteRow::as_returning())
        .get_result(conn)
        .await
        .optional()?;
    if let Some(row) = inserted {
        return Ok(Some(row));
    }

    debug!(book_id = %book_id, "favorite created concurrently");
    let existing: FavoriteRow = favorites::table
        .filter(mine)
        .select(FavoriteRow::as_select())
        .first(conn)
        .await?;
    Ok(Some(existing))
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn favorite_set(&self, user_id: &UserId) -> Result<FavoriteSet, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i64> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .select(favorites::book_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(BookId::new).collect())
    }

    async fn slice_for(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<FavoriteSlice, FavoriteRepositoryError> {
        let owner = *user_id.as_uuid();
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (count, rows) = conn
            .build_transaction()
            .repeatable_read()
            .read_only()
            .run(|conn| {
                async move {
                    let count: i64 = favorites::table
                        .filter(favorites::user_id.eq(owner))
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<FavoriteRow> = favorites::table
                        .filter(favorites::user_id.eq(owner))
                        .select(FavoriteRow::as_select())
                        .order_by((favorites::datetime_created.desc(), favorites::id.desc()))
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((count, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(FavoriteSlice {
            count: non_negative(count, "count(favorites)").map_err(FavoriteRepositoryError::query)?,
            favorites: rows.into_iter().map(row_to_favorite).collect(),
        })
    }

    async fn toggle(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| toggle_favorite(conn, user_id, book_id).scope_boxed())
            .await
            .map_err(|error| error.resolve(|error| map_toggle_error(error, user_id, book_id)))?;
        Ok(match row {
            Some(row) => ToggleOutcome::Created(row_to_favorite(row)),
            None => ToggleOutcome::Removed,
        })
    }
}
