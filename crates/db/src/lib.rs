//! Database layer: connection pool, migrations, models, repositories,
//! and the catalog source adapter.

pub mod models;
pub mod repositories;
pub mod source;

use sqlx::postgres::PgPoolOptions;

/// Shared alias so callers do not depend on sqlx types directly.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
