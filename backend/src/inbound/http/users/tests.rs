//! Tests for the login handler.

use std::sync::Arc;

use super::*;
use crate::domain::UserId;
use crate::inbound::http::test_utils::{
    READER_ID, READER_NAME, READER_PASSWORD, login_cookie, memory_state, session_cookie, test_app,
};
use crate::outbound::memory::MemoryStore;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::Value;

#[fixture]
fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

fn login_request(username: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn valid_credentials_set_a_session_and_record_the_user(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;

    let response = actix_test::call_service(&app, login_request(READER_NAME, READER_PASSWORD)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(session_cookie(&response).name(), "session");
    let body: LoginResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.id, READER_ID);
    assert_eq!(body.username, READER_NAME);
    assert!(store.has_user(&UserId::new(READER_ID).expect("reader id")));
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_unauthorised(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store.clone()))).await;

    let response = actix_test::call_service(&app, login_request(READER_NAME, "wrong")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert!(!store.has_user(&UserId::new(READER_ID).expect("reader id")));
}

#[rstest]
#[case("   ", "secret", "username", "username must not be empty")]
#[case("reader", "", "password", "password must not be empty")]
#[actix_web::test]
async fn blank_fields_are_rejected(
    store: Arc<MemoryStore>,
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;

    let response = actix_test::call_service(&app, login_request(username, password)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "blank");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn helper_login_yields_a_reusable_cookie(store: Arc<MemoryStore>) {
    let app = actix_test::init_service(test_app(memory_state(store))).await;
    let cookie = login_cookie(&app).await;
    assert_eq!(cookie.name(), "session");
}
