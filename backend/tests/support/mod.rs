//! Shared database provisioning for the Diesel integration suites.
//!
//! `BOOKSTORE_TEST_DATABASE_URL` points the suites at an existing server.
//! Without it an embedded PostgreSQL cluster is bootstrapped through
//! `pg-embed-setup-unpriv`. A cluster that cannot start fails the run
//! unless `SKIP_TEST_CLUSTER` is truthy.

use std::sync::OnceLock;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use uuid::Uuid;

/// Overrides the embedded cluster with an existing database.
pub const DATABASE_URL_ENV: &str = "BOOKSTORE_TEST_DATABASE_URL";

/// Returns true when `SKIP_TEST_CLUSTER` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skips with a marker when `SKIP_TEST_CLUSTER` allows it, panics otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// URL of the database the suite should use, or `None` when skipping.
pub async fn database_url() -> Option<String> {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        return Some(url);
    }
    // Cluster bootstrap blocks on its own runtime.
    match tokio::task::spawn_blocking(embedded_database_url).await {
        Ok(Ok(url)) => Some(url),
        Ok(Err(reason)) => handle_cluster_setup_failure(reason),
        Err(join) => handle_cluster_setup_failure(format!("bootstrap task: {join}")),
    }
}

/// One database per test process on the shared embedded cluster.
fn embedded_database_url() -> Result<String, String> {
    static URL: OnceLock<Result<String, String>> = OnceLock::new();
    URL.get_or_init(|| {
        let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
        let name = format!("bookstore_{}", Uuid::new_v4().simple());
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create database: {err:?}"))?;
        Ok(cluster.connection().database_url(name.as_str()))
    })
    .clone()
}
