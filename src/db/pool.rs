use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Create a SQLite connection pool
///
/// The database file (and its parent directory) is created on first run.
/// Foreign keys are enforced on every connection so feedback rows cascade
/// with their owner.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Creating database connection pool...");

    // Create parent directory if it doesn't exist
    if let Some(parent) = database_file(database_url).as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// File path named by a `sqlite:` URL, `None` for in-memory databases
fn database_file(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();

    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file() {
        assert_eq!(
            database_file("sqlite://data/feedback.db"),
            Some(PathBuf::from("data/feedback.db"))
        );
        assert_eq!(
            database_file("sqlite:///var/lib/app/db.sqlite?mode=rwc"),
            Some(PathBuf::from("/var/lib/app/db.sqlite"))
        );
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn test_create_pool_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.db");
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool(&url, 1).await.unwrap();
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();

        assert!(path.exists());
    }
}
