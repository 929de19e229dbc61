//! Recent plays tracking
//!
//! Maintains the bounded, de-duplicated "recently played" list and an
//! in-memory `PlaybackHistoryStore` built on it.

use async_trait::async_trait;
use pariszik_core::{
    error::{Result, ZikError},
    traits::PlaybackHistoryStore,
    types::{ContentId, RecentPlayEntry},
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Recent plays with bounded size
///
/// Most recent entry at the front. Recording an id that is already
/// present moves it to the front instead of adding a second entry.
#[derive(Debug, Clone)]
pub struct RecentPlays {
    /// Entries (most recent = front)
    entries: VecDeque<RecentPlayEntry>,

    /// Maximum number of entries
    max_size: usize,
}

impl RecentPlays {
    /// Create empty list with specified maximum size
    ///
    /// Never holds more than [`RecentPlayEntry::CAPACITY`] entries.
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.min(RecentPlayEntry::CAPACITY);
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a play
    ///
    /// Removes any previous entry for the same id, inserts at the front,
    /// then discards the oldest entries beyond capacity.
    pub fn record(&mut self, entry: RecentPlayEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push_front(entry);
        self.entries.truncate(self.max_size);
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&RecentPlayEntry> {
        self.entries.front()
    }

    /// Check whether an id is present
    pub fn contains(&self, id: &ContentId) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// All entries (most recent first)
    pub fn to_vec(&self) -> Vec<RecentPlayEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get maximum size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for RecentPlays {
    fn default() -> Self {
        Self::new(RecentPlayEntry::CAPACITY)
    }
}

/// Process-local history store
///
/// Useful for headless sessions and tests; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    plays: Mutex<RecentPlays>,
}

impl MemoryHistoryStore {
    /// Empty store with the standard capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with a smaller capacity (at most ten)
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            plays: Mutex::new(RecentPlays::new(max_size)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, RecentPlays>> {
        self.plays
            .lock()
            .map_err(|_| ZikError::storage("recent plays lock poisoned"))
    }
}

#[async_trait]
impl PlaybackHistoryStore for MemoryHistoryStore {
    async fn record_play(&self, entry: RecentPlayEntry) -> Result<()> {
        self.lock()?.record(entry);
        Ok(())
    }

    async fn recent_plays(&self) -> Result<Vec<RecentPlayEntry>> {
        Ok(self.lock()?.to_vec())
    }

    async fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_entry(id: &str) -> RecentPlayEntry {
        RecentPlayEntry {
            id: ContentId::new(id),
            title: format!("Track {}", id),
            artist: "Test Artist".to_string(),
            thumbnail_url: None,
            file_url: format!("/media/{}.mp3", id),
            played_at: Utc::now(),
        }
    }

    fn ids(plays: &RecentPlays) -> Vec<String> {
        plays.to_vec().into_iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn create_recent_plays() {
        let plays = RecentPlays::new(10);
        assert_eq!(plays.max_size(), 10);
        assert!(plays.is_empty());
    }

    #[test]
    fn most_recent_first() {
        let mut plays = RecentPlays::default();
        plays.record(create_test_entry("1"));
        plays.record(create_test_entry("2"));
        plays.record(create_test_entry("3"));

        assert_eq!(ids(&plays), vec!["3", "2", "1"]);
        assert_eq!(plays.latest().unwrap().id.as_str(), "3");
    }

    #[test]
    fn replaying_moves_entry_to_front() {
        let mut plays = RecentPlays::default();
        plays.record(create_test_entry("1"));
        plays.record(create_test_entry("2"));
        plays.record(create_test_entry("1"));

        assert_eq!(ids(&plays), vec!["1", "2"]);
    }

    #[test]
    fn bounded_to_capacity() {
        let mut plays = RecentPlays::new(3);
        for i in 1..=5 {
            plays.record(create_test_entry(&i.to_string()));
        }

        assert_eq!(plays.len(), 3);
        assert_eq!(ids(&plays), vec!["5", "4", "3"]);
    }

    #[test]
    fn default_capacity_is_ten() {
        let mut plays = RecentPlays::default();
        for i in 0..25 {
            plays.record(create_test_entry(&i.to_string()));
        }
        assert_eq!(plays.len(), 10);
        assert_eq!(plays.latest().unwrap().id.as_str(), "24");
    }

    #[test]
    fn capacity_never_exceeds_ten() {
        let plays = RecentPlays::new(25);
        assert_eq!(plays.max_size(), 10);
    }

    #[test]
    fn clear_entries() {
        let mut plays = RecentPlays::default();
        plays.record(create_test_entry("1"));
        plays.clear();
        assert!(plays.is_empty());
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryHistoryStore::new();
        store.record_play(create_test_entry("x")).await.unwrap();
        store.record_play(create_test_entry("y")).await.unwrap();
        store.record_play(create_test_entry("x")).await.unwrap();

        let recent = store.recent_plays().await.unwrap();
        let got: Vec<_> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(got, vec!["x", "y"]);

        store.clear().await.unwrap();
        assert!(store.recent_plays().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_store_stays_bounded_with_large_capacity() {
        let store = MemoryHistoryStore::with_capacity(25);
        for i in 0..20 {
            store.record_play(create_test_entry(&i.to_string())).await.unwrap();
        }

        let recent = store.recent_plays().await.unwrap();
        assert_eq!(recent.len(), RecentPlayEntry::CAPACITY);
        assert_eq!(recent[0].id.as_str(), "19");
    }
}
