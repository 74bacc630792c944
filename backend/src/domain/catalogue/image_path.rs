//! Deterministic blob keys for uploaded book images.
//!
//! Paths depend only on identifiers and the file extension, so they can be
//! computed before the first write.

use std::fmt;

use super::{BookId, CatalogueValidationError};

/// Lower-cased, alphanumeric file extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageExtension(String);

impl ImageExtension {
    /// Validate a bare extension such as `"PNG"` or `".jpg"`.
    pub fn new(raw: &str) -> Result<Self, CatalogueValidationError> {
        let trimmed = raw.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(CatalogueValidationError::MissingExtension);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CatalogueValidationError::InvalidExtension {
                extension: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Take the extension from an uploaded file name.
    ///
    /// # Examples
    /// ```
    /// use bookstore::domain::ImageExtension;
    ///
    /// let ext = ImageExtension::from_file_name("Cover.JPEG").expect("extension");
    /// assert_eq!(ext.as_str(), "jpeg");
    /// assert!(ImageExtension::from_file_name("cover").is_err());
    /// ```
    pub fn from_file_name(file_name: &str) -> Result<Self, CatalogueValidationError> {
        let (_, extension) = file_name
            .rsplit_once('.')
            .ok_or(CatalogueValidationError::MissingExtension)?;
        Self::new(extension)
    }

    /// Extension without the leading dot.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage key for a book's cover image.
pub fn cover_image_path(book_id: BookId, extension: &ImageExtension) -> String {
    format!("books/covers/{book_id}.{extension}")
}

/// Storage key for a gallery image.
pub fn book_image_path(book_id: BookId, image_id: i64, extension: &ImageExtension) -> String {
    format!("books/images/{book_id}_{image_id}.{extension}")
}
