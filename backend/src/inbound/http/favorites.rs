//! Favorite endpoints.
//!
//! ```text
//! GET  /api/v1/favorites?page=2
//! POST /api/v1/favorites {"book":42}
//! ```
//!
//! Posting toggles: the first post stores the favorite and answers 201, the
//! next one removes it and answers 204 with an empty body.

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use pagination::{PAGE_PARAM, PAGE_SIZE_PARAM, Page};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookId, Favorite, ToggleOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::books::QueryPairs;
use crate::inbound::http::schemas::{ErrorSchema, FavoritePageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{BOOK, required};

/// Request body for toggling a favorite.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FavoriteRequest {
    #[schema(example = 42)]
    pub book: Option<i64>,
}

/// Favorite as shown to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub id: i64,
    pub book: i64,
    #[schema(value_type = String, format = DateTime)]
    pub datetime_created: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            book: favorite.book_id.get(),
            datetime_created: favorite.datetime_created,
        }
    }
}

/// Page through the signed-in reader's favorites, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page, capped at the configured maximum")
    ),
    responses(
        (status = 200, description = "Page of favorites", body = FavoritePageSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Invalid page", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites",
    security(("SessionCookie" = []))
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let query = QueryPairs::from_request(&req);
    let page = state
        .pages
        .favorites
        .resolve(query.get(PAGE_PARAM), query.get(PAGE_SIZE_PARAM))?;
    let response = state.favorites_query.list_favorites(&user_id, page).await?;
    let envelope = Page::new(&response.window, &req.full_url(), response.favorites)
        .map(FavoriteResponse::from);
    Ok(HttpResponse::Ok().json(envelope))
}

/// Add a book to favorites, or remove it when already present.
#[utoipa::path(
    post,
    path = "/api/v1/favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Favorite created", body = FavoriteResponse),
        (status = 204, description = "Favorite removed"),
        (status = 400, description = "Missing or unknown book", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite",
    security(("SessionCookie" = []))
)]
#[post("/favorites")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FavoriteRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let book_id = BookId::new(required(payload.into_inner().book, BOOK)?);
    match state.favorites.toggle_favorite(&user_id, book_id).await? {
        ToggleOutcome::Created(favorite) => {
            Ok(HttpResponse::Created().json(FavoriteResponse::from(favorite)))
        }
        ToggleOutcome::Removed => Ok(HttpResponse::NoContent().finish()),
    }
}
