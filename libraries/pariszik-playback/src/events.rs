//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! an event for every observable change; a UI layer drains the queue and
//! renders, either by matching on [`PlaybackEvent`] or by implementing
//! [`PlayerUi`] and calling [`PlaybackEvent::dispatch`].

use pariszik_core::types::{ContentId, MediaItem};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Output started or stopped
    PlayStateChanged { is_playing: bool },

    /// A different item became current (or the previous one was restored)
    TrackChanged { item: MediaItem },

    /// Position or duration changed
    Progress {
        position: Duration,
        duration: Option<Duration>,
    },

    /// Level or mute flag changed
    VolumeChanged { volume: f32, muted: bool },

    /// Favorite flag of an item changed
    FavoriteChanged { id: ContentId, is_favorite: bool },

    /// Something failed; playback already recovered
    Error { kind: ErrorKind, message: String },
}

/// Which side failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Media could not be loaded or played
    Playback,
    /// View count, favorite or recent-play bookkeeping failed
    Repository,
}

/// Statically-typed UI binding
///
/// Every method defaults to doing nothing, so a binding only implements
/// the notifications it renders.
pub trait PlayerUi {
    fn on_play_state_changed(&mut self, _is_playing: bool) {}

    fn on_track_changed(&mut self, _item: &MediaItem) {}

    fn on_progress(&mut self, _position: Duration, _duration: Option<Duration>) {}

    fn on_volume_changed(&mut self, _volume: f32, _muted: bool) {}

    fn on_favorite_changed(&mut self, _id: &ContentId, _is_favorite: bool) {}

    fn on_error(&mut self, _kind: ErrorKind, _message: &str) {}
}

impl PlaybackEvent {
    /// Forward this event to the matching `PlayerUi` method
    pub fn dispatch(&self, ui: &mut dyn PlayerUi) {
        match self {
            Self::PlayStateChanged { is_playing } => ui.on_play_state_changed(*is_playing),
            Self::TrackChanged { item } => ui.on_track_changed(item),
            Self::Progress { position, duration } => ui.on_progress(*position, *duration),
            Self::VolumeChanged { volume, muted } => ui.on_volume_changed(*volume, *muted),
            Self::FavoriteChanged { id, is_favorite } => {
                ui.on_favorite_changed(id, *is_favorite);
            }
            Self::Error { kind, message } => ui.on_error(*kind, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingUi {
        calls: Vec<String>,
    }

    impl PlayerUi for RecordingUi {
        fn on_play_state_changed(&mut self, is_playing: bool) {
            self.calls.push(format!("state:{}", is_playing));
        }

        fn on_favorite_changed(&mut self, id: &ContentId, is_favorite: bool) {
            self.calls.push(format!("fav:{}:{}", id, is_favorite));
        }

        fn on_error(&mut self, kind: ErrorKind, message: &str) {
            self.calls.push(format!("err:{:?}:{}", kind, message));
        }
    }

    #[test]
    fn dispatch_routes_to_matching_callback() {
        let mut ui = RecordingUi::default();

        PlaybackEvent::PlayStateChanged { is_playing: true }.dispatch(&mut ui);
        PlaybackEvent::FavoriteChanged {
            id: ContentId::new("x"),
            is_favorite: true,
        }
        .dispatch(&mut ui);
        PlaybackEvent::Error {
            kind: ErrorKind::Repository,
            message: "offline".to_string(),
        }
        .dispatch(&mut ui);

        assert_eq!(ui.calls, vec!["state:true", "fav:x:true", "err:Repository:offline"]);
    }

    #[test]
    fn unhandled_callbacks_default_to_noop() {
        let mut ui = RecordingUi::default();
        PlaybackEvent::VolumeChanged {
            volume: 0.5,
            muted: false,
        }
        .dispatch(&mut ui);
        assert!(ui.calls.is_empty());
    }
}
