//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use bookstore::domain::ports::{
    BlobUrlResolver, BookRepository, CommentRepository, FavoriteRepository, FixtureLoginService,
    LoginService, RatingRepository, UserRepository,
};
use bookstore::domain::{
    BookCatalogueService, CommentsService, ConfiguredLoginService, FavoritesService,
    RatingsService,
};
use bookstore::inbound::http::state::{HttpState, HttpStatePorts};
use bookstore::outbound::blob::BaseUrlBlobResolver;
use bookstore::outbound::memory::MemoryStore;
use bookstore::outbound::persistence::{
    DieselBookRepository, DieselCommentRepository, DieselFavoriteRepository,
    DieselRatingRepository, DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;
use super::config::LoginAccount;

/// Driven adapters backing one HTTP state.
struct Repositories<B, R, F, C, U> {
    books: Arc<B>,
    ratings: Arc<R>,
    favorites: Arc<F>,
    comments: Arc<C>,
    users: Arc<U>,
}

impl Repositories<MemoryStore, MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    fn memory(store: &Arc<MemoryStore>) -> Self {
        Self {
            books: store.clone(),
            ratings: store.clone(),
            favorites: store.clone(),
            comments: store.clone(),
            users: store.clone(),
        }
    }
}

fn build_login<U>(account: Option<&LoginAccount>, users: Arc<U>) -> Arc<dyn LoginService>
where
    U: UserRepository + 'static,
{
    match account {
        Some(account) => Arc::new(ConfiguredLoginService::new(
            account.user.clone(),
            account.password.as_str(),
            users,
        )),
        None => Arc::new(FixtureLoginService),
    }
}

fn build_ports<B, R, F, C, U>(
    repos: Repositories<B, R, F, C, U>,
    blobs: Arc<dyn BlobUrlResolver>,
    account: Option<&LoginAccount>,
) -> HttpStatePorts
where
    B: BookRepository + 'static,
    R: RatingRepository + 'static,
    F: FavoriteRepository + 'static,
    C: CommentRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        books,
        ratings,
        favorites,
        comments,
        users,
    } = repos;
    let catalogue = Arc::new(BookCatalogueService::new(
        books,
        ratings.clone(),
        favorites.clone(),
        blobs,
    ));
    let favorites = Arc::new(FavoritesService::new(favorites));
    let ratings = Arc::new(RatingsService::new(ratings));
    let comments = Arc::new(CommentsService::new(comments));
    HttpStatePorts {
        login: build_login(account, users),
        catalogue,
        favorites: favorites.clone(),
        favorites_query: favorites,
        ratings: ratings.clone(),
        ratings_query: ratings,
        comments: comments.clone(),
        comments_query: comments,
    }
}

/// Build the HTTP state for `config`.
///
/// With a database pool every port runs over the Diesel repositories;
/// otherwise a fresh in-memory store backs them all.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the media base URL is not an absolute
/// URL.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let blobs: Arc<dyn BlobUrlResolver> = Arc::new(
        BaseUrlBlobResolver::new(&config.media_base_url)
            .map_err(|err| std::io::Error::other(err.to_string()))?,
    );
    let account = config.login.as_ref();
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("serving catalogue from PostgreSQL");
            build_ports(
                Repositories {
                    books: Arc::new(DieselBookRepository::new(pool.clone())),
                    ratings: Arc::new(DieselRatingRepository::new(pool.clone())),
                    favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
                    comments: Arc::new(DieselCommentRepository::new(pool.clone())),
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                },
                blobs,
                account,
            )
        }
        None => {
            info!("serving catalogue from the in-memory store");
            let store = Arc::new(MemoryStore::new());
            build_ports(Repositories::memory(&store), blobs, account)
        }
    };
    Ok(HttpState::new(ports, config.pages))
}
