//! Bookstore entry-point: loads settings, prepares storage and serves the
//! REST API with health probes and OpenAPI docs.

mod server;

use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{Context as _, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookstore::inbound::http::health::HealthState;
use bookstore::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use bookstore::settings::AppSettings;
use ortho_config::OrthoConfig as _;
use server::{LoginAccount, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral)?;

    let mut config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        SameSite::Lax,
        settings.bind_addr()?,
        settings.page_policies()?,
    )
    .with_media_base_url(settings.media_base_url())
    .with_login_account(LoginAccount::new(
        settings.login_account()?,
        settings.login_password(),
    ));

    if let Some(database_url) = settings.database_url.as_deref() {
        let applied = run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_pool_size))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; catalogue data lives in memory only");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(bind_addr = %settings.bind_addr()?, "bookstore listening");
    server.await?;
    Ok(())
}

/// `Key::derive_from` needs at least this much master key material.
const MIN_KEY_BYTES: usize = 32;

fn load_session_key(path: &Path, allow_ephemeral: bool) -> color_eyre::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() < MIN_KEY_BYTES => Err(eyre!(
            "session key at {} must hold at least {MIN_KEY_BYTES} bytes",
            path.display()
        )),
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(eyre!(
            "failed to read session key at {}: {e}",
            path.display()
        )),
    }
}
