//! Application settings loaded via OrthoConfig.
//!
//! Every field can be supplied as a `BOOKSTORE_*` environment variable, a
//! configuration file entry, or a command-line flag. Unset values fall back
//! to the defaults below, which suit a local run against the in-memory
//! store.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::FIXTURE_USER_ID;
use crate::domain::{User, UserId, Username};
use crate::inbound::http::state::PagePolicies;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8080/media/";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_LOGIN_USERNAME: &str = "admin";
const DEFAULT_LOGIN_PASSWORD: &str = "password";

/// Settings values that cannot be turned into runtime configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid page size configuration: {message}")]
    PageSizes { message: String },
    #[error("invalid login account: {message}")]
    LoginAccount { message: String },
}

/// Runtime configuration for the bookstore server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSTORE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// Base URL prefixed to stored image keys.
    pub media_base_url: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`; on unless explicitly disabled.
    pub cookie_secure: Option<bool>,
    /// Default page size of the book listing.
    #[ortho_config(default = 10)]
    pub books_page_size: u32,
    /// Default page size of the favorites listing.
    #[ortho_config(default = 5)]
    pub favorites_page_size: u32,
    /// Largest page size a client may request.
    #[ortho_config(default = 50)]
    pub max_page_size: u32,
    /// Username of the account accepted at login.
    pub login_username: Option<String>,
    /// Password of the account accepted at login.
    pub login_password: Option<String>,
    /// Identifier recorded for the login account.
    pub login_user_id: Option<String>,
}

impl AppSettings {
    /// Parse the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// Media base URL, falling back to the local default.
    pub fn media_base_url(&self) -> &str {
        self.media_base_url
            .as_deref()
            .unwrap_or(DEFAULT_MEDIA_BASE_URL)
    }

    /// Session key file, falling back to the mounted secret path.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Page size policies for the paginated endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PageSizes`] when a size is zero or a default
    /// exceeds the maximum.
    pub fn page_policies(&self) -> Result<PagePolicies, SettingsError> {
        PagePolicies::new(
            self.books_page_size,
            self.favorites_page_size,
            self.max_page_size,
        )
        .map_err(|err| SettingsError::PageSizes {
            message: err.to_string(),
        })
    }

    /// Account accepted by the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::LoginAccount`] when the username or id is
    /// malformed.
    pub fn login_account(&self) -> Result<User, SettingsError> {
        let invalid = |err: crate::domain::UserValidationError| SettingsError::LoginAccount {
            message: err.to_string(),
        };
        let id = UserId::new(self.login_user_id.as_deref().unwrap_or(FIXTURE_USER_ID))
            .map_err(invalid)?;
        let username = Username::new(
            self.login_username
                .as_deref()
                .unwrap_or(DEFAULT_LOGIN_USERNAME),
        )
        .map_err(invalid)?;
        Ok(User::new(id, username))
    }

    /// Password of the login account.
    pub fn login_password(&self) -> &str {
        self.login_password
            .as_deref()
            .unwrap_or(DEFAULT_LOGIN_PASSWORD)
    }
}
