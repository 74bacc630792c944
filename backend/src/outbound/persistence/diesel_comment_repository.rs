//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{BookId, Comment, CommentBody, CommentStatus, UserId, Username};

use super::diesel_helpers::{
    ConstraintViolation, TxError, collect_rows, constraint_violation, map_basic_diesel_error,
    map_pool_error_message,
};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{books, comments, users};

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    CommentRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment((row, username): (CommentRow, String)) -> Result<Comment, String> {
    Ok(Comment {
        id: row.id,
        username: Username::new(&username).map_err(|err| err.to_string())?,
        book_id: BookId::new(row.book_id),
        body: row.body,
        status: row.status.parse().map_err(|err: crate::domain::CommentValidationError| {
            err.to_string()
        })?,
        datetime_created: row.datetime_created,
    })
}

async fn insert_comment(
    conn: &mut AsyncPgConnection,
    user_id: &UserId,
    book_id: BookId,
    body: &CommentBody,
) -> Result<(CommentRow, String), TxError<CommentRepositoryError>> {
    let book_exists: bool =
        diesel::select(exists(books::table.filter(books::id.eq(book_id.get()))))
            .get_result(conn)
            .await?;
    if !book_exists {
        return Err(TxError::Rejected(CommentRepositoryError::book_not_found(
            book_id.get(),
        )));
    }

    let username: Option<String> = users::table
        .find(*user_id.as_uuid())
        .select(users::username)
        .first(conn)
        .await
        .optional()?;
    let Some(username) = username else {
        return Err(TxError::Rejected(CommentRepositoryError::user_not_found(
            user_id.to_string(),
        )));
    };

    let row: CommentRow = diesel::insert_into(comments::table)
        .values(&NewCommentRow {
            user_id: *user_id.as_uuid(),
            book_id: book_id.get(),
            body: body.as_str(),
            status: CommentStatus::default().code(),
        })
        .returning(CommentRow::as_returning())
        .get_result(conn)
        .await?;
    Ok((row, username))
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_approved(&self, book_id: BookId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::book_id.eq(book_id.get()))
            .filter(comments::status.eq(CommentStatus::Approved.code()))
            .select((CommentRow::as_select(), users::username))
            .order_by((comments::datetime_created.desc(), comments::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows.into_iter().map(row_to_comment), CommentRepositoryError::query)
    }

    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: &CommentBody,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let created = conn
            .transaction(|conn| insert_comment(conn, user_id, book_id, body).scope_boxed())
            .await
            .map_err(|error| {
                error.resolve(|error| match constraint_violation(&error) {
                    Some(ConstraintViolation::ForeignKey) => {
                        CommentRepositoryError::book_not_found(book_id.get())
                    }
                    _ => map_diesel_error(error),
                })
            })?;
        row_to_comment(created).map_err(CommentRepositoryError::query)
    }
}
