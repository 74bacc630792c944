//! Tests for the catalogue read endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use url::Url;

use crate::domain::{BookImage, BookId, ImageRef};
use crate::inbound::http::test_utils::{login_cookie, memory_state, test_app};
use crate::outbound::memory::MemoryStore;
use crate::test_support::{author, book, category, publisher, translator};

#[fixture]
fn store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();

    let mut emma = book(1, "Emma");
    emma.price = 1_500;
    emma.authors = vec![author(1, "Jane Austen")];
    emma.category = category(1, "Classics");
    emma.cover_image = ImageRef::new("books/covers/1.png").ok();
    emma.images = vec![
        BookImage {
            id: 10,
            book_id: BookId::new(1),
            image: ImageRef::new("books/images/10.png").ok(),
            description: "Front".to_owned(),
        },
        BookImage {
            id: 11,
            book_id: BookId::new(1),
            image: None,
            description: "Back".to_owned(),
        },
    ];

    let mut dune = book(2, "Dune");
    dune.price = 900;
    dune.authors = vec![author(2, "Frank Herbert")];
    dune.category = category(2, "Science Fiction");

    let mut stranger = book(3, "The Stranger");
    stranger.price = 1_200;
    stranger.authors = vec![author(3, "Albert Camus")];
    stranger.translators = vec![translator(1, "Matthew Ward")];
    stranger.publisher = publisher(2, "Vintage");
    stranger.category = category(1, "Classics");

    for entry in [emma, dune, stranger] {
        store.insert_book(entry);
    }
    Arc::new(store)
}

async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response =
        actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

fn ids(page: &Value) -> Vec<i64> {
    page["results"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["id"].as_i64()).collect())
        .unwrap_or_default()
}

fn query_value(link: &Value, key: &str) -> Option<String> {
    Url::parse(link.as_str()?)
        .ok()?
        .query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

#[rstest]
#[actix_web::test]
async fn anonymous_listing_is_newest_first_without_personal_fields(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, "/api/v1/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1]);
    assert_eq!(body["count"], 3);
    assert_eq!(body["pages"], 1);
    assert!(body["next"].is_null());
    for row in body["results"].as_array().into_iter().flatten() {
        assert_eq!(row["is_favorited"], false);
        assert!(row["my_rating"].is_null());
        assert_eq!(row["rating_count"], 0);
        assert!(row["avg_rating"].is_null());
    }
}

#[rstest]
#[actix_web::test]
async fn authenticated_listing_includes_rating_and_favorite(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;
    let cookie = login_cookie(&app).await;
    let rated = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/books/1/ratings")
            .cookie(cookie.clone())
            .set_json(json!({"score": 4}))
            .to_request(),
    )
    .await;
    assert_eq!(rated.status(), StatusCode::CREATED);
    let favorited = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/favorites")
            .cookie(cookie.clone())
            .set_json(json!({"book": 2}))
            .to_request(),
    )
    .await;
    assert_eq!(favorited.status(), StatusCode::CREATED);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/books?ordering=price")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(ids(&body), vec![2, 3, 1]);
    let rows = &body["results"];
    assert_eq!(rows[0]["is_favorited"], true);
    assert!(rows[0]["my_rating"].is_null());
    assert_eq!(rows[2]["my_rating"], 4);
    assert_eq!(rows[2]["avg_rating"], 4.0);
    assert_eq!(rows[2]["rating_count"], 1);
    assert_eq!(rows[2]["is_favorited"], false);
}

#[rstest]
#[case("/api/v1/books?category=classics", vec![3, 1])]
#[case("/api/v1/books?search=herbert", vec![2])]
#[case("/api/v1/books?search=ward", vec![3])]
#[case("/api/v1/books?category=classics&publisher=vintage", vec![3])]
#[case("/api/v1/books?author=nobody", vec![])]
#[case("/api/v1/books?ordering=-price", vec![1, 3, 2])]
#[case("/api/v1/books?ordering=datetime_created", vec![1, 2, 3])]
#[case("/api/v1/books?ordering=colour", vec![3, 2, 1])]
#[case("/api/v1/books?colour=red", vec![3, 2, 1])]
#[actix_web::test]
async fn filters_and_ordering_shape_the_listing(
    store: Arc<MemoryStore>,
    #[case] uri: &str,
    #[case] expected: Vec<i64>,
) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), expected);
}

#[rstest]
#[actix_web::test]
async fn empty_results_report_zero_pages() {
    let app = actix_test::init_service(test_app(memory_state(Arc::new(MemoryStore::new())))).await;

    let (status, body) = get_json(&app, "/api/v1/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["pages"], 0);
    assert_eq!(body["page"], 1);
    assert!(body["previous"].is_null());
}

#[rstest]
#[case("/api/v1/books?page=2")]
#[case("/api/v1/books?page=0")]
#[case("/api/v1/books?page=last")]
#[actix_web::test]
async fn invalid_pages_are_not_found(store: Arc<MemoryStore>, #[case] uri: &str) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid page.");
}

#[rstest]
#[actix_web::test]
async fn page_links_keep_filters(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, first) = get_json(&app, "/api/v1/books?ordering=price&page_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pages"], 2);
    assert_eq!(first["page_size"], 2);
    assert_eq!(query_value(&first["next"], "page").as_deref(), Some("2"));
    assert_eq!(query_value(&first["next"], "page_size").as_deref(), Some("2"));
    assert_eq!(query_value(&first["next"], "ordering").as_deref(), Some("price"));

    let (_, second) = get_json(&app, "/api/v1/books?ordering=price&page_size=2&page=2").await;
    assert_eq!(ids(&second), vec![1]);
    assert!(second["next"].is_null());
    assert_eq!(query_value(&second["previous"], "page").as_deref(), Some("1"));
}

#[rstest]
#[case("500", 50)]
#[case("0", 10)]
#[case("many", 10)]
#[actix_web::test]
async fn page_sizes_are_normalised(
    store: Arc<MemoryStore>,
    #[case] requested: &str,
    #[case] effective: u32,
) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, &format!("/api/v1/books?page_size={requested}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page_size"], effective);
}

#[rstest]
#[actix_web::test]
async fn single_book_carries_resolved_media(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, "/api/v1/books/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Emma");
    assert_eq!(body["cover_image"], "/media/books/covers/1.png");
    assert_eq!(body["authors"][0]["name"], "Jane Austen");
    assert_eq!(body["category"]["title"], "Classics");
    assert_eq!(body["approximate_study_time"], 3_600);
    assert_eq!(body["images"].as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn unknown_book_is_not_found(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, "/api/v1/books/404").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case(1, json!([
    {"id": 10, "image": "/media/books/images/10.png", "description": "Front"},
    {"id": 11, "image": null, "description": "Back"}
]))]
#[case(2, json!([]))]
#[case(404, json!([]))]
#[actix_web::test]
async fn images_list_in_insertion_order(
    store: Arc<MemoryStore>,
    #[case] book_id: i64,
    #[case] expected: Value,
) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let (status, body) = get_json(&app, &format!("/api/v1/books/{book_id}/images")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}
