//! Shared helpers for Diesel repository implementations.
//!
//! Repositories keep their own port error types; these helpers translate pool
//! and Diesel failures into those types through constructor closures, and
//! carry domain rejections out of transactions.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Database messages are logged at debug level and replaced with a fixed
/// description so SQL details never reach callers.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Integrity constraint reported by PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A unique index rejected the write.
    Unique,
    /// A foreign key rejected the write or delete.
    ForeignKey,
}

/// Classify `error` as an integrity violation, if it is one.
pub fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            Some(ConstraintViolation::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            Some(ConstraintViolation::ForeignKey)
        }
        _ => None,
    }
}

/// Error type for transaction bodies that can reject with a domain error.
///
/// `Rejected` rolls the transaction back like any other error but survives
/// the commit path untouched, so callers can tell it apart from a database
/// failure.
#[derive(Debug)]
pub enum TxError<E> {
    /// The database reported a failure.
    Diesel(DieselError),
    /// The transaction body refused the operation.
    Rejected(E),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl<E> TxError<E> {
    /// Collapse into the repository error, mapping database failures with
    /// `map_diesel`.
    pub fn resolve(self, map_diesel: impl FnOnce(DieselError) -> E) -> E {
        match self {
            Self::Diesel(error) => map_diesel(error),
            Self::Rejected(error) => error,
        }
    }
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Convert a stored integer column into the unsigned domain value.
pub fn non_negative<T, U>(value: T, column: &str) -> Result<U, String>
where
    U: TryFrom<T>,
    T: Copy + std::fmt::Display,
{
    U::try_from(value).map_err(|_| format!("{column} holds out-of-range value {value}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for shared Diesel mapping helpers.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    fn map(error: DieselError) -> Mapped {
        map_basic_diesel_error(error, Mapped::Query, Mapped::Connection)
    }

    #[rstest]
    fn not_found_maps_to_query() {
        assert_eq!(map(DieselError::NotFound), Mapped::Query("record not found"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert_eq!(map(error), Mapped::Connection("database connection error"));
    }

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation, Some(ConstraintViolation::Unique))]
    #[case(DatabaseErrorKind::ForeignKeyViolation, Some(ConstraintViolation::ForeignKey))]
    #[case(DatabaseErrorKind::CheckViolation, None)]
    fn violations_are_classified(
        #[case] kind: DatabaseErrorKind,
        #[case] expected: Option<ConstraintViolation>,
    ) {
        let error = DieselError::DatabaseError(kind, Box::new(String::from("violation")));
        assert_eq!(constraint_violation(&error), expected);
    }

    #[rstest]
    fn rejected_transactions_keep_their_error() {
        let tx: TxError<Mapped> = TxError::Rejected(Mapped::Query("duplicate"));
        assert_eq!(tx.resolve(map), Mapped::Query("duplicate"));
    }

    #[rstest]
    fn diesel_failures_are_mapped_on_resolve() {
        let tx: TxError<Mapped> = DieselError::NotFound.into();
        assert_eq!(tx.resolve(map), Mapped::Query("record not found"));
    }

    #[rstest]
    fn negative_columns_are_rejected() {
        let converted: Result<u64, String> = non_negative(-3_i64, "books.price");
        assert_eq!(
            converted.expect_err("negative"),
            "books.price holds out-of-range value -3"
        );
    }

    #[rstest]
    fn collect_rows_reports_first_failure() {
        let rows = vec![Ok(1), Err("bad row".to_owned()), Err("later".to_owned())];
        let collected: Result<Vec<i32>, String> = collect_rows(rows.into_iter(), |m| m);
        assert_eq!(collected.expect_err("failure"), "bad row");
    }
}
