//! Port turning stored image keys into client-facing URLs.

use crate::domain::ImageRef;

/// Resolves blob keys to URLs.
///
/// Resolution is pure string work, so the port is synchronous.
pub trait BlobUrlResolver: Send + Sync {
    /// URL clients use to fetch the image.
    fn resolve(&self, key: &ImageRef) -> String;
}

/// Fixture resolver serving everything from `/media/`.
///
/// # Examples
/// ```
/// use bookstore::domain::ImageRef;
/// use bookstore::domain::ports::{BlobUrlResolver, FixtureBlobUrlResolver};
///
/// let key = ImageRef::new("books/covers/1.png").expect("key");
/// assert_eq!(FixtureBlobUrlResolver.resolve(&key), "/media/books/covers/1.png");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBlobUrlResolver;

impl BlobUrlResolver for FixtureBlobUrlResolver {
    fn resolve(&self, key: &ImageRef) -> String {
        format!("/media/{}", key.as_str())
    }
}
