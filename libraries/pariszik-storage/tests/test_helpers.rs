//! Test helpers and fixtures for storage integration tests
//!
//! Test databases are REAL SQLite files in a temp dir (NOT in-memory) so
//! migrations, WAL mode and the pool behave as in production.

use pariszik_core::{CreateContent, MediaItem};
use pariszik_storage::contents;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = pariszik_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        pariszik_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a published item
pub async fn create_test_content(pool: &SqlitePool, title: &str) -> MediaItem {
    contents::create(
        pool,
        CreateContent::new(title, "Test Artist", format!("/media/{}.mp3", title)),
    )
    .await
    .expect("Failed to create test content")
}

/// Test fixture: Create a live item
pub async fn create_live_content(pool: &SqlitePool, title: &str) -> MediaItem {
    let mut content = CreateContent::new(title, "Live Artist", format!("https://live.example/{}", title));
    content.is_live = true;

    contents::create(pool, content)
        .await
        .expect("Failed to create live content")
}
