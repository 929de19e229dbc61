/// Recently played entry
use crate::types::{ContentId, MediaItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the recent-plays list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPlayEntry {
    /// Item that was played
    pub id: ContentId,

    /// Title at the time of playing
    pub title: String,

    /// Artist at the time of playing
    pub artist: String,

    /// Cover image reference
    pub thumbnail_url: Option<String>,

    /// Playable file reference
    pub file_url: String,

    /// When playback was started
    pub played_at: DateTime<Utc>,
}

impl RecentPlayEntry {
    /// Maximum number of entries kept by a history store
    pub const CAPACITY: usize = 10;

    /// Snapshot the display fields of `item`
    pub fn from_item(item: &MediaItem, played_at: DateTime<Utc>) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            artist: item.artist.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            file_url: item.file_url.clone(),
            played_at,
        }
    }
}
