//! Book catalogue domain types.
//!
//! Books, their reference entities, and the query vocabulary (filters and
//! ordering) used to list them. Everything here is immutable data plus pure
//! functions; persistence lives behind the ports in [`crate::domain::ports`].

mod book;
mod filter;
mod image_path;
mod ordering;
mod references;

pub use book::{Book, BookId, BookImage, ImageRef};
pub use filter::{BookFilter, FILTER_KEYS};
pub use image_path::{ImageExtension, book_image_path, cover_image_path};
pub use ordering::{BookOrdering, ORDERING_PARAM, OrderDirection, OrderField};
pub use references::{Author, Category, ContentFormat, Language, Publisher, Translator};

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending field name.
        field: &'static str,
    },
    /// A file name carried no usable extension.
    #[error("image file name must carry an extension")]
    MissingExtension,
    /// An extension contained characters other than ASCII letters and digits.
    #[error("image extension must be alphanumeric (got {extension})")]
    InvalidExtension {
        /// Extension as supplied.
        extension: String,
    },
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
