use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::core::config::DatabaseConfig;

/// Build the shared Postgres pool for the back-office API.
///
/// One pool serves every feature service; sizing comes from
/// `DatabaseConfig`, whose defaults favor a handful of long-lived
/// connections over burst capacity (the traffic this API sees is a small
/// operations team plus the fleet sync).
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Postgres pool ready"
    );

    Ok(pool)
}
