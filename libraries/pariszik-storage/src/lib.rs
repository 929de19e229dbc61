//! ParisZik Storage
//!
//! `SQLite` persistence layer for ParisZik.
//!
//! This crate stores the content catalog, listener comments and the
//! durable recent-plays list, and implements the `pariszik-core`
//! collaborator traits on top of them.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries (`contents`,
//!   `comments`, `recent_plays`)
//! - **Trait Adapter**: [`LocalStorageContext`] exposes the slices through
//!   `ContentRepository` and `PlaybackHistoryStore`
//!
//! # Example
//!
//! ```rust,no_run
//! use pariszik_core::{ContentRepository, CreateContent};
//! use pariszik_storage::{contents, create_pool, run_migrations, LocalStorageContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://pariszik.db").await?;
//! run_migrations(&pool).await?;
//!
//! let item = contents::create(&pool, CreateContent::new("Intro", "DJ Seine", "/media/intro.mp3")).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! storage.increment_views(&item.id).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod comments;
pub mod contents;
pub mod recent_plays;

pub use context::LocalStorageContext;
pub use error::StorageError;

use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use std::path::Path;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The database file (and its parent directory) is created when missing.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://pariszik.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = database_url, "Creating SQLite pool");

    if let Some(parent) = database_file(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(url = database_url, "Database pool ready");

    Ok(pool)
}

/// File path of an on-disk `SQLite` URL (`None` for in-memory databases)
fn database_file(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(Path::new(path))
    }
}

/// Epoch milliseconds as stored in the database
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
