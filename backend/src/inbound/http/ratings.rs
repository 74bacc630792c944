//! Rating endpoints scoped to the signed-in reader.
//!
//! ```text
//! GET  /api/v1/books/{book_id}/ratings
//! POST /api/v1/books/{book_id}/ratings {"score":4}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookId, Rating};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_score;

/// Request body for rating a book.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RatingRequest {
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub score: Option<i64>,
}

/// Rater identity embedded in a rating.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingUser {
    #[schema(example = "8d1f3a52-51e4-4c1e-9f0e-6f4f5b1c2a77")]
    pub id: String,
    #[schema(example = "reader")]
    pub username: String,
}

/// Rating as shown to its author.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub id: i64,
    pub user: RatingUser,
    pub book: i64,
    #[schema(minimum = 1, maximum = 5)]
    pub score: u8,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user: RatingUser {
                id: rating.user.id().to_string(),
                username: rating.user.username().as_ref().to_owned(),
            },
            book: rating.book_id.get(),
            score: rating.score.get(),
        }
    }
}

/// List the signed-in reader's ratings of a book.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/ratings",
    params(("book_id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Own ratings", body = [RatingResponse]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "listRatings",
    security(("SessionCookie" = []))
)]
#[get("/books/{book_id}/ratings")]
pub async fn list_ratings(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let ratings = state
        .ratings_query
        .list_ratings(&user_id, BookId::new(path.into_inner()))
        .await?;
    let body: Vec<RatingResponse> = ratings.into_iter().map(RatingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Rate a book once.
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/ratings",
    params(("book_id" = i64, Path, description = "Book identifier")),
    request_body = RatingRequest,
    responses(
        (status = 201, description = "Rating stored", body = RatingResponse),
        (status = 400, description = "Score out of range or duplicate rating", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Book not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ratings"],
    operation_id = "createRating",
    security(("SessionCookie" = []))
)]
#[post("/books/{book_id}/ratings")]
pub async fn create_rating(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<RatingRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let score = parse_score(payload.into_inner().score)?;
    let rating = state
        .ratings
        .rate_book(&user_id, BookId::new(path.into_inner()), score)
        .await?;
    Ok(HttpResponse::Created().json(RatingResponse::from(rating)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::inbound::http::test_utils::{READER_ID, login_cookie, memory_state, test_app};
    use crate::outbound::memory::MemoryStore;
    use crate::test_support::book;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        store.insert_book(book(1, "Emma"));
        store.insert_book(book(2, "Persuasion"));
        Arc::new(store)
    }

    fn rate(book_id: i64, payload: Value) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/books/{book_id}/ratings"))
            .set_json(payload)
    }

    #[rstest]
    #[actix_web::test]
    async fn rating_a_book_returns_the_rating(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;
        let cookie = login_cookie(&app).await;

        let response =
            actix_test::call_service(&app, rate(1, json!({"score": 4})).cookie(cookie).to_request())
                .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: RatingResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.book, 1);
        assert_eq!(body.score, 4);
        assert_eq!(body.user.id, READER_ID);
        assert_eq!(store.rating_count(BookId::new(1)), 1);
    }

    #[rstest]
    #[actix_web::test]
    async fn second_rating_is_rejected_and_not_stored(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;
        let cookie = login_cookie(&app).await;
        let first = actix_test::call_service(
            &app,
            rate(1, json!({"score": 5})).cookie(cookie.clone()).to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second =
            actix_test::call_service(&app, rate(1, json!({"score": 2})).cookie(cookie).to_request())
                .await;

        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["message"], "You have already rated this book.");
        assert_eq!(body["details"]["code"], "unique");
        assert_eq!(store.rating_count(BookId::new(1)), 1);
    }

    #[rstest]
    #[case(json!({"score": 0}), "min_value")]
    #[case(json!({"score": 6}), "max_value")]
    #[case(json!({}), "required")]
    #[actix_web::test]
    async fn out_of_range_scores_are_rejected(
        store: Arc<MemoryStore>,
        #[case] payload: Value,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;
        let cookie = login_cookie(&app).await;

        let response =
            actix_test::call_service(&app, rate(1, payload).cookie(cookie).to_request()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "score");
        assert_eq!(body["details"]["code"], code);
        assert_eq!(store.rating_count(BookId::new(1)), 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_books_are_not_found(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            rate(99, json!({"score": 3})).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_returns_only_the_readers_ratings_for_the_book(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let cookie = login_cookie(&app).await;
        for (book_id, score) in [(1, 3), (2, 5)] {
            let response = actix_test::call_service(
                &app,
                rate(book_id, json!({ "score": score }))
                    .cookie(cookie.clone())
                    .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/books/2/ratings")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<RatingResponse> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].book, 2);
        assert_eq!(body[0].score, 5);
    }

    #[rstest]
    #[case("GET")]
    #[case("POST")]
    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised(store: Arc<MemoryStore>, #[case] method: &str) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let request = match method {
            "GET" => actix_test::TestRequest::get().uri("/api/v1/books/1/ratings"),
            _ => rate(1, json!({"score": 3})),
        };

        let response = actix_test::call_service(&app, request.to_request()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
