//! Page request resolution and result windows.

use std::num::NonZeroU32;

use crate::PaginationError;

/// Query parameter carrying the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the requested page size.
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Default and maximum page sizes for one endpoint.
///
/// ## Invariants
/// - `default_size <= max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizePolicy {
    default_size: NonZeroU32,
    max_size: NonZeroU32,
}

impl PageSizePolicy {
    /// Build a policy, rejecting a default larger than the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPolicy`] when `default_size`
    /// exceeds `max_size`.
    pub fn new(default_size: NonZeroU32, max_size: NonZeroU32) -> Result<Self, PaginationError> {
        if default_size > max_size {
            return Err(PaginationError::InvalidPolicy {
                default: default_size.get(),
                max: max_size.get(),
            });
        }
        Ok(Self {
            default_size,
            max_size,
        })
    }

    /// Page size applied when the client does not ask for one.
    #[must_use]
    pub const fn default_size(&self) -> u32 {
        self.default_size.get()
    }

    /// Upper bound applied to client-requested page sizes.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size.get()
    }

    /// Resolve raw query values into a validated request.
    ///
    /// A missing page means page 1. Page sizes that are missing, zero, or not
    /// numeric fall back to the default; larger sizes are capped at the
    /// maximum.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPage`] when `page` is zero or not a
    /// positive integer.
    pub fn resolve(
        &self,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Result<PageRequest, PaginationError> {
        let page_number = match page {
            None => 1,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    return Err(PaginationError::InvalidPage {
                        requested: raw.to_owned(),
                    });
                }
            },
        };

        let size = page_size
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .and_then(NonZeroU32::new)
            .map_or(self.default_size, |requested| requested.min(self.max_size));

        Ok(PageRequest {
            page: page_number,
            page_size: size,
            default_size: self.default_size,
        })
    }
}

/// Validated page number and effective page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: NonZeroU32,
    default_size: NonZeroU32,
}

impl PageRequest {
    /// Requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Effective page size after applying the policy.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    /// Whether the effective size equals the endpoint default.
    #[must_use]
    pub fn uses_default_size(&self) -> bool {
        self.page_size == self.default_size
    }

    /// Number of rows to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(u64::from(self.page_size.get()))
    }

    /// Maximum number of rows on the requested page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size.get())
    }

    /// Check the request against the number of matching rows.
    ///
    /// Page 1 is always valid so an empty result still yields an envelope.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOutOfRange`] when the page lies beyond
    /// the last page.
    pub fn window(&self, count: u64) -> Result<PageWindow, PaginationError> {
        let pages = count.div_ceil(u64::from(self.page_size.get()));
        if self.page > pages.max(1) {
            return Err(PaginationError::PageOutOfRange {
                page: self.page,
                pages,
            });
        }
        Ok(PageWindow {
            request: *self,
            count,
            pages,
        })
    }
}

/// A page request known to fall inside the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    request: PageRequest,
    count: u64,
    pages: u64,
}

impl PageWindow {
    /// The request this window was derived from.
    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Total number of matching rows across all pages.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Total number of pages.
    #[must_use]
    pub const fn pages(&self) -> u64 {
        self.pages
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.request.offset()
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.request.limit()
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.request.page < self.pages
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page > 1
    }
}
