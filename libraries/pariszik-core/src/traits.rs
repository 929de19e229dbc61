//! Collaborator traits consumed by the playback controller
//!
//! Both traits are implemented by `pariszik-storage` (SQLite) and by
//! in-memory stores used for tests and headless sessions.

use crate::error::Result;
use crate::types::{ContentId, MediaItem, RecentPlayEntry};
use async_trait::async_trait;

/// Read/write access to content records
///
/// Counters and flags are owned by the repository. Callers only ever hold
/// transient copies of a `MediaItem`.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch a single item, `None` when no record has this id
    async fn get_by_id(&self, id: &ContentId) -> Result<Option<MediaItem>>;

    /// Add one to the item's view counter
    ///
    /// # Errors
    /// `ZikError::NotFound` when the id is unknown
    async fn increment_views(&self, id: &ContentId) -> Result<()>;

    /// Flip the item's favorite flag and return the new value
    ///
    /// # Errors
    /// `ZikError::NotFound` when the id is unknown
    async fn toggle_favorite(&self, id: &ContentId) -> Result<bool>;
}

/// Bounded, de-duplicated list of recently played items
///
/// Implementations keep at most `RecentPlayEntry::CAPACITY` entries,
/// most recent first, with no two entries sharing an item id.
#[async_trait]
pub trait PlaybackHistoryStore: Send + Sync {
    /// Insert `entry` at the front, dropping any older entry for the same id
    /// and trimming the list to capacity
    async fn record_play(&self, entry: RecentPlayEntry) -> Result<()>;

    /// All entries, most recent first
    async fn recent_plays(&self) -> Result<Vec<RecentPlayEntry>>;

    /// Remove every entry
    async fn clear(&self) -> Result<()>;
}
