//! PostgreSQL-backed `ReferenceEntityRepository` implementation.
//!
//! Publishers and categories are referenced from `books` with
//! `ON DELETE RESTRICT`; deletes check for referencing books first and map a
//! racing foreign-key violation to the same protected error.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use tracing::info;

use crate::domain::ports::{ReferenceEntityRepository, ReferenceEntityRepositoryError};

use super::diesel_helpers::{
    ConstraintViolation, TxError, constraint_violation, map_basic_diesel_error,
    map_pool_error_message,
};
use super::pool::{DbPool, PoolError};
use super::schema::{books, categories, publishers};

const PUBLISHER: &str = "publisher";
const CATEGORY: &str = "category";

/// Diesel-backed implementation of the `ReferenceEntityRepository` port.
#[derive(Clone)]
pub struct DieselReferenceEntityRepository {
    pool: DbPool,
}

impl DieselReferenceEntityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceEntityRepositoryError {
    ReferenceEntityRepositoryError::connection(map_pool_error_message(error))
}

fn map_delete_error(
    error: diesel::result::Error,
    entity: &'static str,
    id: i64,
) -> ReferenceEntityRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey) => {
            ReferenceEntityRepositoryError::protected(entity, id)
        }
        _ => map_basic_diesel_error(
            error,
            ReferenceEntityRepositoryError::query,
            ReferenceEntityRepositoryError::connection,
        ),
    }
}

type DeleteResult = Result<(), TxError<ReferenceEntityRepositoryError>>;

/// Turn the existence and reference checks into a rejection, if any.
fn guard_delete(entity: &'static str, id: i64, present: bool, referenced: bool) -> DeleteResult {
    if !present {
        return Err(TxError::Rejected(ReferenceEntityRepositoryError::not_found(
            entity, id,
        )));
    }
    if referenced {
        return Err(TxError::Rejected(ReferenceEntityRepositoryError::protected(
            entity, id,
        )));
    }
    Ok(())
}

async fn delete_publisher_row(conn: &mut AsyncPgConnection, id: i64) -> DeleteResult {
    let present: bool = diesel::select(exists(publishers::table.find(id)))
        .get_result(conn)
        .await?;
    let referenced: bool =
        diesel::select(exists(books::table.filter(books::publisher_id.eq(id))))
            .get_result(conn)
            .await?;
    guard_delete(PUBLISHER, id, present, referenced)?;
    diesel::delete(publishers::table.find(id))
        .execute(conn)
        .await?;
    Ok(())
}

async fn delete_category_row(conn: &mut AsyncPgConnection, id: i64) -> DeleteResult {
    let present: bool = diesel::select(exists(categories::table.find(id)))
        .get_result(conn)
        .await?;
    let referenced: bool =
        diesel::select(exists(books::table.filter(books::category_id.eq(id))))
            .get_result(conn)
            .await?;
    guard_delete(CATEGORY, id, present, referenced)?;
    diesel::delete(categories::table.find(id))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ReferenceEntityRepository for DieselReferenceEntityRepository {
    async fn delete_publisher(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| delete_publisher_row(conn, id).scope_boxed())
            .await
            .map_err(|error| error.resolve(|error| map_delete_error(error, PUBLISHER, id)))?;
        info!(publisher_id = id, "publisher deleted");
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| delete_category_row(conn, id).scope_boxed())
            .await
            .map_err(|error| error.resolve(|error| map_delete_error(error, CATEGORY, id)))?;
        info!(category_id = id, "category deleted");
        Ok(())
    }
}
