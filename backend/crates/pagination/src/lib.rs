//! Page-number pagination primitives shared by bookstore backend endpoints.
//!
//! The crate splits pagination into three steps so adapters never need to
//! reason about offsets or link construction themselves:
//!
//! 1. [`PageSizePolicy::resolve`] turns raw `page` / `page_size` query values
//!    into a validated [`PageRequest`], bounding the page size by the policy
//!    maximum.
//! 2. [`PageRequest::window`] checks the request against the total number of
//!    matching rows and yields a [`PageWindow`] (offset, limit, page count).
//!    Requests beyond the last page are rejected rather than clamped.
//! 3. [`Page::new`] wraps the fetched items in the response envelope with
//!    absolute `next` / `previous` links derived from the request URL.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroU32;
//!
//! use pagination::{Page, PageSizePolicy};
//! use url::Url;
//!
//! let policy = PageSizePolicy::new(
//!     NonZeroU32::new(5).expect("non-zero"),
//!     NonZeroU32::new(50).expect("non-zero"),
//! )
//! .expect("valid policy");
//! let request = policy.resolve(Some("2"), None).expect("valid request");
//! let window = request.window(12).expect("page in range");
//! let base = Url::parse("http://testserver/api/v1/favorites?page=2").expect("url");
//!
//! let page = Page::new(&window, &base, vec!["f", "g", "h", "i", "j"]);
//! assert_eq!(page.pages, 3);
//! assert_eq!(
//!     page.previous.as_deref(),
//!     Some("http://testserver/api/v1/favorites?page=1")
//! );
//! ```

mod envelope;
mod error;
mod links;
mod request;

pub use envelope::Page;
pub use error::PaginationError;
pub use links::page_url;
pub use request::{PAGE_PARAM, PAGE_SIZE_PARAM, PageRequest, PageSizePolicy, PageWindow};
