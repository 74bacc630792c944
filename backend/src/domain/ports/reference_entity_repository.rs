//! Port for administering reference entities that books depend on.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised when deleting reference entities.
    pub enum ReferenceEntityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reference repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reference repository query failed: {message}",
        /// No row with this id exists.
        NotFound { entity: String, id: i64 } => "{entity} {id} does not exist",
        /// At least one book still references the row.
        Protected { entity: String, id: i64 } =>
            "{entity} {id} is referenced by books and cannot be deleted",
    }
}

/// Deletion of delete-protected reference rows.
///
/// Deleting a publisher or category that any book references fails with
/// [`ReferenceEntityRepositoryError::Protected`] and removes nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceEntityRepository: Send + Sync {
    /// Delete a publisher.
    async fn delete_publisher(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError>;

    /// Delete a category.
    async fn delete_category(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError>;
}
