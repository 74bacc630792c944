//! Book catalogue read endpoints.
//!
//! ```text
//! GET /api/v1/books?search=austen&ordering=-price&page=2&page_size=20
//! GET /api/v1/books/{book_id}
//! GET /api/v1/books/{book_id}/images
//! ```
//!
//! Anonymous requests are allowed; an authenticated session adds
//! `my_rating` and `is_favorited` to every record.

use actix_web::{HttpRequest, HttpResponse, get, web};
use pagination::{PAGE_PARAM, PAGE_SIZE_PARAM, Page};

use crate::domain::ports::ListBooksRequest;
use crate::domain::{BookFilter, BookId, BookOrdering, ORDERING_PARAM};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{BookPageSchema, BookSchema, ErrorSchema, ImageSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Decoded query pairs in request order.
pub(crate) struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub(crate) fn from_request(req: &HttpRequest) -> Self {
        Self(
            url::form_urlencoded::parse(req.query_string().as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// Last value supplied for `key`.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// List books matching the query filters.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    description = "Filter, sort and paginate the catalogue. Filters: search, category, author, translator, publisher, language, formats (case-insensitive substring match, combined with AND).",
    params(
        ("search" = Option<String>, Query, description = "Matches name, author, translator or publisher"),
        ("category" = Option<String>, Query, description = "Category title"),
        ("author" = Option<String>, Query, description = "Any linked author name"),
        ("translator" = Option<String>, Query, description = "Any linked translator name"),
        ("publisher" = Option<String>, Query, description = "Publisher name"),
        ("language" = Option<String>, Query, description = "Any linked language name"),
        ("formats" = Option<String>, Query, description = "Any linked content format name"),
        ("ordering" = Option<String>, Query, description = "price, datetime_created or datetime_modified, optionally prefixed with '-'"),
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page, capped at the configured maximum")
    ),
    responses(
        (status = 200, description = "Page of book records", body = BookPageSchema),
        (status = 404, description = "Invalid page", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security((), ("SessionCookie" = []))
)]
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let query = QueryPairs::from_request(&req);
    let page = state
        .pages
        .books
        .resolve(query.get(PAGE_PARAM), query.get(PAGE_SIZE_PARAM))?;
    let request = ListBooksRequest {
        filter: BookFilter::from_pairs(query.iter()),
        ordering: BookOrdering::parse(query.get(ORDERING_PARAM)),
        page,
        requester: session.user_id()?,
    };
    let response = state.catalogue.list_books(request).await?;
    let envelope = Page::new(&response.window, &req.full_url(), response.records);
    Ok(HttpResponse::Ok().json(envelope))
}

/// Fetch one book record.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}",
    params(("book_id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Book record", body = BookSchema),
        (status = 404, description = "Book not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBook",
    security((), ("SessionCookie" = []))
)]
#[get("/books/{book_id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let book_id = BookId::new(path.into_inner());
    let record = state
        .catalogue
        .get_book(book_id, session.user_id()?)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// List a book's gallery images.
#[utoipa::path(
    get,
    path = "/api/v1/books/{book_id}/images",
    description = "Gallery images in insertion order; an unknown book yields an empty list.",
    params(("book_id" = i64, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "Images", body = [ImageSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBookImages",
    security([])
)]
#[get("/books/{book_id}/images")]
pub async fn list_images(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let images = state
        .catalogue
        .list_images(BookId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(images))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
