//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::domain::ports::{BlobUrlResolver, FixtureBlobUrlResolver, LoginService};
use crate::domain::{
    BookCatalogueService, CommentsService, ConfiguredLoginService, FavoritesService,
    RatingsService, User, UserId, Username,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts, PagePolicies};
use crate::outbound::memory::MemoryStore;

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";
/// Identifier of the account accepted by [`memory_state`].
pub const READER_ID: &str = "8d1f3a52-51e4-4c1e-9f0e-6f4f5b1c2a77";
/// Username of the account accepted by [`memory_state`].
pub const READER_NAME: &str = "reader";
/// Password of the account accepted by [`memory_state`].
pub const READER_PASSWORD: &str = "correct horse";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Disables the `Secure` flag for plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// The account [`memory_state`] logs in.
pub fn reader() -> User {
    User::new(
        UserId::new(READER_ID).expect("reader id"),
        Username::new(READER_NAME).expect("reader name"),
    )
}

/// HTTP state whose services all run over `store`, with stock page sizes
/// and a login service accepting [`reader`].
pub fn memory_state(store: Arc<MemoryStore>) -> HttpState {
    let login = Arc::new(ConfiguredLoginService::new(
        reader(),
        READER_PASSWORD,
        store.clone(),
    ));
    let pages = PagePolicies::standard().expect("stock policies");
    memory_state_with(store, login, pages)
}

/// [`memory_state`] with an explicit login service and page policies.
pub fn memory_state_with(
    store: Arc<MemoryStore>,
    login: Arc<dyn LoginService>,
    pages: PagePolicies,
) -> HttpState {
    let blobs: Arc<dyn BlobUrlResolver> = Arc::new(FixtureBlobUrlResolver);
    let favorites = Arc::new(FavoritesService::new(store.clone()));
    let ratings = Arc::new(RatingsService::new(store.clone()));
    let comments = Arc::new(CommentsService::new(store.clone()));
    HttpState::new(
        HttpStatePorts {
            login,
            catalogue: Arc::new(BookCatalogueService::new(
                store.clone(),
                store.clone(),
                store,
                blobs,
            )),
            favorites: favorites.clone(),
            favorites_query: favorites,
            ratings: ratings.clone(),
            ratings_query: ratings,
            comments: comments.clone(),
            comments_query: comments,
        },
        pages,
    )
}

/// App serving the `/api/v1` surface over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure_api),
    )
}

/// Log [`reader`] in and return the issued session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": READER_NAME, "password": READER_PASSWORD }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    session_cookie(&response)
}
