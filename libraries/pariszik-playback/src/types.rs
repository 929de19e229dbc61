//! Core types for playback control

use crate::volume::DEFAULT_VOLUME;
use pariszik_core::types::{MediaItem, RecentPlayEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current item
    Idle,

    /// Current item loaded, output paused
    Paused,

    /// Current item loaded, output running (or about to)
    Playing,
}

impl PlaybackState {
    /// Whether an item is loaded
    pub fn is_loaded(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Generation tag attached to each media load
///
/// Strictly increasing per controller. Engine signals carrying an older
/// token than the controller's current one are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadToken(pub u64);

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a `play` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A new load was started under this token
    Started(LoadToken),

    /// The item was already playing, so it was paused instead
    Paused,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// Recent plays kept by the durable history store (1-10, default: 10)
    pub history_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
            history_capacity: RecentPlayEntry::CAPACITY,
        }
    }
}

/// Read-only view of a session at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: PlaybackState,
    pub current: Option<MediaItem>,
    pub playlist: Vec<MediaItem>,
    /// `None` when no playlist entry is selected
    pub current_index: Option<usize>,
    pub volume: f32,
    pub muted: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub initialized: bool,
}

impl SessionSnapshot {
    /// Index as the UI sees it: `-1` when nothing is selected
    pub fn display_index(&self) -> i64 {
        self.current_index.map_or(-1, |i| i as i64)
    }

    /// Whether output is running
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }
}
