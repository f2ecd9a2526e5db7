pub mod pool;

pub use pool::create_pool;

use sqlx::SqlitePool;

/// Apply the migrations under `./migrations`
///
/// Creates the `users` and `feedback` tables on first run.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}

/// Open the pool and bring the schema up to date
pub async fn open_database(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
