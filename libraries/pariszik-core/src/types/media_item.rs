//! Media item domain type
//!
//! A playable content record (track or clip) with display metadata and
//! engagement counters. Records are owned by a `ContentRepository`.

use crate::types::ContentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Playable content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique content identifier
    pub id: ContentId,

    /// Title shown in the player
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Cover image reference (URL or path)
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    /// Playable file reference (URL or path)
    pub file_url: String,

    /// Number of plays started
    #[serde(default)]
    pub views: u64,

    /// Number of likes
    #[serde(default)]
    pub likes: u64,

    /// Number of comments
    #[serde(default)]
    pub comments: u64,

    /// Favorite marker
    #[serde(default)]
    pub is_favorite: bool,

    /// Live stream flag
    #[serde(default)]
    pub is_live: bool,

    /// Visible to listeners
    #[serde(default = "default_published")]
    pub is_published: bool,

    /// Who uploaded the item
    #[serde(default)]
    pub uploaded_by: Option<String>,

    /// When the item was uploaded
    pub uploaded_at: DateTime<Utc>,

    /// Last modification time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_published() -> bool {
    true
}

impl MediaItem {
    /// Create a new published item with zeroed counters
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: ContentId::generate(),
            title: title.into(),
            artist: artist.into(),
            description: None,
            thumbnail_url: None,
            file_url: file_url.into(),
            views: 0,
            likes: 0,
            comments: 0,
            is_favorite: false,
            is_live: false,
            is_published: true,
            uploaded_by: None,
            uploaded_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Same item with a fixed id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ContentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Same item with a cover image
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }
}

/// Data required to create a content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContent {
    pub title: String,
    pub artist: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_url: String,
    pub is_live: bool,
    pub uploaded_by: Option<String>,
}

impl CreateContent {
    /// Minimal creation request
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            description: None,
            thumbnail_url: None,
            file_url: file_url.into(),
            is_live: false,
            uploaded_by: None,
        }
    }
}

/// Partial update of a content record
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateContent {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub file_url: Option<String>,
    pub is_live: Option<bool>,
    pub is_published: Option<bool>,
}

impl UpdateContent {
    /// True when the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.description.is_none()
            && self.thumbnail_url.is_none()
            && self.file_url.is_none()
            && self.is_live.is_none()
            && self.is_published.is_none()
    }
}
