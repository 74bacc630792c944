//! HTTP server configuration object.

use actix_web::cookie::{Key, SameSite};
use bookstore::domain::User;
use bookstore::inbound::http::state::PagePolicies;
use bookstore::outbound::persistence::DbPool;
use std::net::SocketAddr;
use zeroize::Zeroizing;

/// Media base URL used when none is configured.
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8080/media/";

/// Account accepted by the login endpoint.
pub struct LoginAccount {
    pub(crate) user: User,
    pub(crate) password: Zeroizing<String>,
}

impl LoginAccount {
    /// Accept `user` when presented with `password`.
    pub fn new(user: User, password: impl Into<String>) -> Self {
        Self {
            user,
            password: Zeroizing::new(password.into()),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pages: PagePolicies,
    pub(crate) media_base_url: String,
    pub(crate) login: Option<LoginAccount>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration serving from the in-memory store with the
    /// fixture login account.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        pages: PagePolicies,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            pages,
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_owned(),
            login: None,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; every repository then reads and
    /// writes PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Resolve image keys against `base`.
    #[must_use]
    pub fn with_media_base_url(mut self, base: impl Into<String>) -> Self {
        self.media_base_url = base.into();
        self
    }

    /// Accept `account` at login instead of the fixture account.
    #[must_use]
    pub fn with_login_account(mut self, account: LoginAccount) -> Self {
        self.login = Some(account);
        self
    }
}
