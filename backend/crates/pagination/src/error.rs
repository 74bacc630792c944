//! Errors raised while resolving page requests.

/// Failures produced when a page request cannot be honoured.
///
/// Both page variants render the same client-facing message so adapters can
/// surface them verbatim without leaking the total page count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The `page` parameter was not a positive integer.
    #[error("Invalid page.")]
    InvalidPage {
        /// Raw value supplied by the client.
        requested: String,
    },
    /// The page number lies beyond the last available page.
    #[error("Invalid page.")]
    PageOutOfRange {
        /// Requested page number.
        page: u64,
        /// Number of pages available for the current result set.
        pages: u64,
    },
    /// The policy default exceeds the configured maximum.
    #[error("default page size {default} exceeds maximum page size {max}")]
    InvalidPolicy {
        /// Configured default page size.
        default: u32,
        /// Configured maximum page size.
        max: u32,
    },
}
