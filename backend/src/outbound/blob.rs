//! Blob URL resolution against a configured media base URL.

use url::Url;

use crate::domain::ImageRef;
use crate::domain::ports::BlobUrlResolver;

/// Errors raised while configuring the resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobResolverError {
    /// The base URL did not parse as an absolute URL.
    #[error("media base URL `{url}` is invalid: {message}")]
    InvalidBase { url: String, message: String },
    /// The base URL cannot carry path segments (for example `mailto:`).
    #[error("media base URL `{url}` cannot be a base")]
    NotABase { url: String },
}

/// [`BlobUrlResolver`] joining storage keys onto an absolute base URL.
///
/// # Examples
/// ```
/// use bookstore::domain::ImageRef;
/// use bookstore::domain::ports::BlobUrlResolver;
/// use bookstore::outbound::blob::BaseUrlBlobResolver;
///
/// let resolver = BaseUrlBlobResolver::new("https://cdn.example.com/media").expect("base");
/// let key = ImageRef::new("books/covers/7.png").expect("key");
/// assert_eq!(resolver.resolve(&key), "https://cdn.example.com/media/books/covers/7.png");
/// ```
#[derive(Debug, Clone)]
pub struct BaseUrlBlobResolver {
    base: Url,
}

impl BaseUrlBlobResolver {
    /// Parse `base`, treating its path as a directory.
    pub fn new(base: &str) -> Result<Self, BlobResolverError> {
        let mut url = Url::parse(base).map_err(|err| BlobResolverError::InvalidBase {
            url: base.to_owned(),
            message: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(BlobResolverError::NotABase {
                url: base.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base: url })
    }

    /// Base URL keys are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl BlobUrlResolver for BaseUrlBlobResolver {
    fn resolve(&self, key: &ImageRef) -> String {
        let relative = key.as_str().trim_start_matches('/');
        self.base
            .join(relative)
            .map(String::from)
            .unwrap_or_else(|_| format!("{}{relative}", self.base))
    }
}
