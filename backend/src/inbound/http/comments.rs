//! Book comment endpoints.
//!
//! ```text
//! GET  /api/v1/books/{book_id}/comments
//! POST /api/v1/books/{book_id}/comments {"body":"Loved it"}
//! ```
//!
//! Only approved comments are listed. New comments wait for moderation, so
//! a successful post is not visible in the listing until approved.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookId, Comment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_comment_body;

/// Request body for posting a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CommentRequest {
    #[schema(example = "Loved it")]
    pub body: Option<String>,
}

/// Public author of a comment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentAuthor {
    #[schema(example = "reader")]
    pub username: String,
}

/// Comment as shown to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub user: CommentAuthor,
    pub body: String,
    #[schema(value_type = String, format = DateTime)]
    pub datetime_created: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user: CommentAuthor {
                username: comment.username.as_ref().to_owned(),
            },
            body: comment.body,
            datetime_created: comment.datetime_created,
        }
    }
}

/// List approved comments on a book, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/comments",
    params(("book_id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Approved comments", body = [CommentResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/books/{book_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comments = state
        .comments_query
        .list_comments(BookId::new(path.into_inner()))
        .await?;
    let body: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Submit a comment for moderation.
#[utoipa::path(
    post,
    path = "/api/v1/books/{book_id}/comments",
    params(("book_id" = i64, Path, description = "Book identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment stored, awaiting moderation", body = CommentResponse),
        (status = 400, description = "Blank or missing body", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Book not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment",
    security(("SessionCookie" = []))
)]
#[post("/books/{book_id}/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let body = parse_comment_body(payload.into_inner().body)?;
    let comment = state
        .comments
        .post_comment(&user_id, BookId::new(path.into_inner()), body)
        .await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{CommentStatus, UserId};
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
        Arc::new(store)
    }

    fn post_comment(book_id: i64, payload: Value) -> actix_test::TestRequest {
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/books/{book_id}/comments"))
            .set_json(payload)
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_shows_only_approved_comments(store: Arc<MemoryStore>) {
        let reader = UserId::new(READER_ID).expect("reader id");
        store.insert_user(crate::inbound::http::test_utils::reader());
        store.insert_comment(&reader, BookId::new(1), "Approved", CommentStatus::Approved);
        store.insert_comment(&reader, BookId::new(1), "Waiting", CommentStatus::Waiting);
        store.insert_comment(&reader, BookId::new(1), "Rejected", CommentStatus::NotApproved);
        let app = actix_test::init_service(test_app(memory_state(store))).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/books/1/comments")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<CommentResponse> = actix_test::read_body_json(response).await;
        let bodies: Vec<&str> = body.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["Approved"]);
        assert_eq!(body[0].user.username, "reader");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_books_list_no_comments(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/books/404/comments")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<Value> = actix_test::read_body_json(response).await;
        assert!(body.is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn posted_comments_wait_for_moderation(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            post_comment(1, json!({"body": "Loved it"}))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CommentResponse = actix_test::read_body_json(response).await;
        assert_eq!(created.body, "Loved it");
        let listed = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/books/1/comments")
                .to_request(),
        )
        .await;
        let listed: Vec<CommentResponse> = actix_test::read_body_json(listed).await;
        assert!(listed.is_empty());
    }

    #[rstest]
    #[case(1, json!({"body": "  "}), StatusCode::BAD_REQUEST)]
    #[case(1, json!({}), StatusCode::BAD_REQUEST)]
    #[case(99, json!({"body": "Hello"}), StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn invalid_posts_are_rejected(
        store: Arc<MemoryStore>,
        #[case] book_id: i64,
        #[case] payload: Value,
        #[case] expected: StatusCode,
    ) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let cookie = login_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            post_comment(book_id, payload).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(response.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_posts_are_unauthorised(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let response = actix_test::call_service(
            &app,
            post_comment(1, json!({"body": "Hello"})).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn comments_cannot_be_deleted(store: Arc<MemoryStore>) {
        let app = actix_test::init_service(test_app(memory_state(store))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/books/1/comments")
                .to_request(),
        )
        .await;
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::NO_CONTENT);
    }
}
