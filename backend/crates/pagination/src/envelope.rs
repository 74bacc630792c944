//! Paginated response envelope.

use serde::Serialize;
use url::Url;

use crate::{PageWindow, page_url};

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of matching items across all pages.
    pub count: u64,
    /// Total number of pages; zero when nothing matched.
    pub pages: u64,
    /// Current 1-based page number.
    pub page: u64,
    /// Effective page size.
    pub page_size: u32,
    /// Absolute link to the following page, if any.
    pub next: Option<String>,
    /// Absolute link to the preceding page, if any.
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap `results` in an envelope for `window`.
    ///
    /// `base` is the absolute request URL; links keep its non-pagination
    /// query parameters.
    #[must_use]
    pub fn new(window: &PageWindow, base: &Url, results: Vec<T>) -> Self {
        let request = window.request();
        let page = request.page();
        let next = window
            .has_next()
            .then(|| page_url(base, request, page + 1).into());
        let previous = window
            .has_previous()
            .then(|| page_url(base, request, page - 1).into());
        Self {
            count: window.count(),
            pages: window.pages(),
            page,
            page_size: request.page_size(),
            next,
            previous,
            results,
        }
    }

    /// Transform each result while keeping the navigation metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            pages: self.pages,
            page: self.page,
            page_size: self.page_size,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
