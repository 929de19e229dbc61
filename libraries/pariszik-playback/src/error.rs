//! Error types for playback control

use pariszik_core::{types::ContentId, ZikError};
use thiserror::Error;

/// Playback errors
///
/// `MediaLoad` and `Engine` are media failures: the session has already
/// been returned to its last good state when they are reported.
/// `Repository` covers bookkeeping that failed without affecting playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Media could not be loaded or started
    #[error("Cannot play {item_id}: {reason}")]
    MediaLoad { item_id: ContentId, reason: String },

    /// Media engine rejected an operation
    #[error("Media engine error: {0}")]
    Engine(String),

    /// Requested content does not exist
    #[error("Content not found: {0}")]
    ContentNotFound(ContentId),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Content repository or history store failed
    #[error("Repository error: {0}")]
    Repository(#[from] ZikError),
}

impl PlaybackError {
    /// Whether this is a media failure rather than a bookkeeping one
    pub fn is_media_failure(&self) -> bool {
        matches!(self, Self::MediaLoad { .. } | Self::Engine(_))
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
