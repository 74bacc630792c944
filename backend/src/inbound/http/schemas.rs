//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and are registered with
//! utoipa under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Invalid page.")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "7b1c7f9e-5d7a-4a43-9d7c-2f0a9f7f8e11")]
    trace_id: Option<String>,
    /// Field-level details, e.g. `{"field": "score", "code": "max_value"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Author`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Author)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AuthorSchema {
    id: i64,
    #[schema(example = "Jane Austen")]
    name: String,
    biography: String,
    #[schema(value_type = String, format = DateTime)]
    datetime_created: String,
}

/// OpenAPI schema for [`crate::domain::Translator`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Translator)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TranslatorSchema {
    id: i64,
    name: String,
    about: String,
    #[schema(value_type = String, format = DateTime)]
    datetime_created: String,
}

/// OpenAPI schema for [`crate::domain::Publisher`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Publisher)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PublisherSchema {
    id: i64,
    #[schema(example = "Penguin")]
    name: String,
    about: String,
    #[schema(value_type = String, format = DateTime)]
    datetime_created: String,
}

/// OpenAPI schema for [`crate::domain::Category`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Category)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CategorySchema {
    id: i64,
    #[schema(example = "Poetry")]
    title: String,
    description: String,
}

/// OpenAPI schema for [`crate::domain::Language`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Language)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct LanguageSchema {
    id: i64,
    #[schema(example = "English")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::ContentFormat`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ContentFormat)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ContentFormatSchema {
    id: i64,
    #[schema(example = "PDF")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::ImageRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImageRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImageSchema {
    id: i64,
    /// Resolved URL, or null when no file is attached.
    #[schema(example = "https://cdn.example.com/media/books/images/1_3.jpg")]
    image: Option<String>,
    description: String,
}

/// OpenAPI schema for [`crate::domain::BookRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BookRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct BookSchema {
    id: i64,
    #[schema(example = "Emma")]
    name: String,
    description: String,
    /// Resolved cover URL, or null.
    cover_image: Option<String>,
    images: Vec<ImageSchema>,
    authors: Vec<AuthorSchema>,
    translators: Vec<TranslatorSchema>,
    publisher: PublisherSchema,
    category: CategorySchema,
    languages: Vec<LanguageSchema>,
    content_formats: Vec<ContentFormatSchema>,
    /// Price in the smallest currency unit.
    price: u64,
    active: bool,
    /// Download size in megabytes.
    volume: u32,
    number_of_pages: u32,
    /// Approximate study time in seconds.
    approximate_study_time: u64,
    #[schema(value_type = String, format = Date)]
    publication_date: String,
    #[schema(value_type = String, format = DateTime)]
    datetime_created: String,
    #[schema(value_type = String, format = DateTime)]
    datetime_modified: String,
    /// Mean score, or null when the book has no ratings.
    #[schema(example = 4.5)]
    avg_rating: Option<f64>,
    rating_count: u64,
    /// The requester's own score; null for anonymous requests.
    my_rating: Option<u8>,
    /// Always false for anonymous requests.
    is_favorited: bool,
}

/// Paginated envelope of book records.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct BookPageSchema {
    count: u64,
    /// Zero when nothing matched.
    pages: u64,
    page: u64,
    page_size: u32,
    #[schema(example = "http://localhost:8080/api/v1/books?page=2")]
    next: Option<String>,
    previous: Option<String>,
    results: Vec<BookSchema>,
}

/// Paginated envelope of favorites.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FavoritePageSchema {
    count: u64,
    pages: u64,
    page: u64,
    page_size: u32,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<crate::inbound::http::favorites::FavoriteResponse>,
}
