//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` endpoint, the health probes, the
//! request/response DTOs and the schema wrappers for domain records, plus
//! the session cookie security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::comments::{CommentAuthor, CommentRequest, CommentResponse};
use crate::inbound::http::favorites::{FavoriteRequest, FavoriteResponse};
use crate::inbound::http::ratings::{RatingRequest, RatingResponse, RatingUser};
use crate::inbound::http::schemas::{
    AuthorSchema, BookPageSchema, BookSchema, CategorySchema, ContentFormatSchema,
    ErrorCodeSchema, ErrorSchema, FavoritePageSchema, ImageSchema, LanguageSchema,
    PublisherSchema, TranslatorSchema,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookstore catalogue API",
        description = "Book listings with per-reader ratings, favorites and moderated comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::list_images,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::ratings::list_ratings,
        crate::inbound::http::ratings::create_rating,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        AuthorSchema,
        TranslatorSchema,
        PublisherSchema,
        CategorySchema,
        LanguageSchema,
        ContentFormatSchema,
        ImageSchema,
        BookSchema,
        BookPageSchema,
        FavoritePageSchema,
        LoginRequest,
        LoginResponse,
        CommentRequest,
        CommentAuthor,
        CommentResponse,
        RatingRequest,
        RatingUser,
        RatingResponse,
        FavoriteRequest,
        FavoriteResponse,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "books", description = "Catalogue listings and details"),
        (name = "comments", description = "Moderated reader comments"),
        (name = "ratings", description = "One rating per reader and book"),
        (name = "favorites", description = "Per-reader favorite books"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
