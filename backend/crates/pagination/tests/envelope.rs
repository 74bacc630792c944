//! Behavioural coverage for the paginated response envelope.

use std::num::NonZeroU32;

use pagination::{Page, PageSizePolicy, PaginationError};
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};
use url::Url;

#[fixture]
fn favorites_policy() -> PageSizePolicy {
    PageSizePolicy::new(
        NonZeroU32::new(5).expect("non-zero"),
        NonZeroU32::new(50).expect("non-zero"),
    )
    .expect("valid policy")
}

#[given("twelve favorites and a request for page two")]
fn twelve_favorites_on_page_two() -> (u64, Url) {
    (
        12,
        Url::parse("http://testserver/api/favorites/?page=2").expect("url"),
    )
}

#[when("the envelope is built")]
fn the_envelope_is_built(policy: PageSizePolicy, input: (u64, Url)) -> Result<Value, PaginationError> {
    let (count, base) = input;
    let page = base
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned());
    let window = policy.resolve(page.as_deref(), None)?.window(count)?;
    let offset = usize::try_from(window.offset()).expect("offset fits");
    let limit = usize::try_from(window.limit()).expect("limit fits");
    let items: Vec<u64> = (1..=count).skip(offset).take(limit).collect();
    Ok(serde_json::to_value(Page::new(&window, &base, items)).expect("serialise page"))
}

#[then("both neighbour links are absolute")]
fn both_neighbour_links_are_absolute(result: Result<Value, PaginationError>) {
    let body = result.expect("envelope");
    assert_eq!(body["count"], json!(12));
    assert_eq!(body["pages"], json!(3));
    assert_eq!(body["page"], json!(2));
    assert_eq!(body["page_size"], json!(5));
    assert_eq!(
        body["next"],
        json!("http://testserver/api/favorites/?page=3")
    );
    assert_eq!(
        body["previous"],
        json!("http://testserver/api/favorites/?page=1")
    );
    assert_eq!(body["results"], json!([6, 7, 8, 9, 10]));
}

#[rstest]
fn middle_page_links_both_ways(favorites_policy: PageSizePolicy) {
    let input = twelve_favorites_on_page_two();
    let result = the_envelope_is_built(favorites_policy, input);
    both_neighbour_links_are_absolute(result);
}

#[given("twelve favorites and a request for page four")]
fn twelve_favorites_on_page_four() -> (u64, Url) {
    (
        12,
        Url::parse("http://testserver/api/favorites/?page=4").expect("url"),
    )
}

#[then("the page is reported as invalid")]
fn the_page_is_reported_as_invalid(result: Result<Value, PaginationError>) {
    let err = result.expect_err("page four is beyond the last page");
    assert_eq!(err.to_string(), "Invalid page.");
}

#[rstest]
fn page_beyond_last_is_invalid(favorites_policy: PageSizePolicy) {
    let input = twelve_favorites_on_page_four();
    let result = the_envelope_is_built(favorites_policy, input);
    the_page_is_reported_as_invalid(result);
}

#[rstest]
fn empty_results_yield_an_empty_first_page(favorites_policy: PageSizePolicy) {
    let base = Url::parse("http://testserver/api/favorites/").expect("url");
    let window = favorites_policy
        .resolve(None, None)
        .expect("request")
        .window(0)
        .expect("window");
    let page: Page<u64> = Page::new(&window, &base, Vec::new());

    assert_eq!(page.count, 0);
    assert_eq!(page.pages, 0);
    assert_eq!(page.page, 1);
    assert!(page.next.is_none());
    assert!(page.previous.is_none());
    assert!(page.results.is_empty());
}

#[rstest]
fn mapping_results_keeps_metadata(favorites_policy: PageSizePolicy) {
    let base = Url::parse("http://testserver/api/favorites/").expect("url");
    let window = favorites_policy
        .resolve(None, None)
        .expect("request")
        .window(7)
        .expect("window");
    let page = Page::new(&window, &base, vec![1_u64, 2, 3, 4, 5]).map(|id| format!("fav-{id}"));

    assert_eq!(page.results.first().map(String::as_str), Some("fav-1"));
    assert_eq!(page.pages, 2);
    assert_eq!(
        page.next.as_deref(),
        Some("http://testserver/api/favorites/?page=2")
    );
}
