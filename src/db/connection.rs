use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::db::errors::{DbError, Result};

/// Create the database connection pool.
///
/// The pool is constructed once at startup and passed explicitly to every
/// query function; there is no global handle.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Initializing database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Duration::from_secs(10))
        .max_lifetime(Duration::from_secs(300))
        .test_before_acquire(true)
        .connect_lazy(database_url)
        .map_err(|e| DbError::Connection(format!("Failed to create pool: {}", e)))?;

    // Probe the connection so a bad URL fails at startup, not first query
    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .map_err(|e| DbError::Connection(format!("Failed to test connection: {}", e)))?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Verify the backend is reachable.
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| DbError::Connection(format!("Health check failed: {}", e)))?;
    Ok(())
}
