//! Absolute page link construction.

use url::Url;

use crate::{PAGE_PARAM, PAGE_SIZE_PARAM, PageRequest};

/// Build the absolute URL for `page`, keeping every other query parameter.
///
/// Existing `page` and `page_size` pairs are replaced. `page_size` is only
/// emitted when the request uses a non-default size, so default-sized links
/// stay short.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU32;
///
/// use pagination::{PageSizePolicy, page_url};
/// use url::Url;
///
/// let policy = PageSizePolicy::new(
///     NonZeroU32::new(10).expect("non-zero"),
///     NonZeroU32::new(50).expect("non-zero"),
/// )
/// .expect("valid policy");
/// let request = policy.resolve(None, Some("20")).expect("request");
/// let base = Url::parse("http://testserver/api/v1/books?search=dune").expect("url");
///
/// assert_eq!(
///     page_url(&base, &request, 2).as_str(),
///     "http://testserver/api/v1/books?search=dune&page=2&page_size=20"
/// );
/// ```
#[must_use]
pub fn page_url(base: &Url, request: &PageRequest, page: u64) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != PAGE_SIZE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_fragment(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(PAGE_PARAM, &page.to_string());
        if !request.uses_default_size() {
            pairs.append_pair(PAGE_SIZE_PARAM, &request.page_size().to_string());
        }
    }
    url
}
