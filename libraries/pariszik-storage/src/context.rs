use crate::{contents, recent_plays};
use async_trait::async_trait;
use pariszik_core::{
    error::Result,
    traits::{ContentRepository, PlaybackHistoryStore},
    types::*,
};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
///
/// Backs both collaborators of the playback controller with one pool.
#[derive(Debug, Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
    history_capacity: usize,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            history_capacity: RecentPlayEntry::CAPACITY,
        }
    }

    /// Keep fewer recent plays than the standard ten
    ///
    /// Larger values are capped at [`RecentPlayEntry::CAPACITY`].
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.min(RecentPlayEntry::CAPACITY);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }
}

#[async_trait]
impl ContentRepository for LocalStorageContext {
    async fn get_by_id(&self, id: &ContentId) -> Result<Option<MediaItem>> {
        contents::get_by_id(&self.pool, id).await
    }

    async fn increment_views(&self, id: &ContentId) -> Result<()> {
        contents::increment_views(&self.pool, id).await
    }

    async fn toggle_favorite(&self, id: &ContentId) -> Result<bool> {
        contents::toggle_favorite(&self.pool, id).await
    }
}

#[async_trait]
impl PlaybackHistoryStore for LocalStorageContext {
    async fn record_play(&self, entry: RecentPlayEntry) -> Result<()> {
        recent_plays::record(&self.pool, &entry, self.history_capacity).await
    }

    async fn recent_plays(&self) -> Result<Vec<RecentPlayEntry>> {
        recent_plays::list(&self.pool, self.history_capacity).await
    }

    async fn clear(&self) -> Result<()> {
        recent_plays::clear(&self.pool).await
    }
}
