//! Platform-agnostic media engine trait
//!
//! Abstracts the single media resource the controller drives (an HTML audio
//! element behind a bridge, a native decoder, a headless stub, ...).

use crate::error::Result;
use crate::types::LoadToken;
use std::time::Duration;

/// Single redirectable media resource
///
/// Calls return immediately. Completion is reported later through
/// [`EngineSignal`]s fed back into
/// [`PlaybackController::handle_signal`](crate::PlaybackController::handle_signal)
/// together with the [`LoadToken`] passed to `load`.
pub trait MediaEngine: Send {
    /// Point the resource at `file_url` and start fetching it
    ///
    /// Signals caused by this load must carry `token`.
    ///
    /// # Returns
    /// * `Ok(())` - Load accepted (it may still fail later with `Failed`)
    /// * `Err(_)` - Reference rejected outright (unsupported, unreachable)
    fn load(&mut self, file_url: &str, token: LoadToken) -> Result<()>;

    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output
    fn pause(&mut self);

    /// Move the playback position
    fn set_current_time(&mut self, position: Duration) -> Result<()>;

    /// Total duration, once metadata is known
    fn duration(&self) -> Option<Duration>;

    /// Output level in `[0.0, 1.0]`
    fn set_volume(&mut self, volume: f32);

    /// Silence output without touching the level
    fn set_muted(&mut self, muted: bool);
}

/// Lifecycle notifications emitted by a media engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineSignal {
    /// Output actually started
    Started,

    /// Output paused (by the engine or the platform)
    Paused,

    /// End of media reached
    Ended,

    /// Position moved during playback
    TimeUpdated { position: Duration },

    /// Duration became known
    MetadataReady { duration: Duration },

    /// Media could not be fetched or decoded
    Failed { reason: String },
}

/// Engine that accepts everything and never signals
///
/// For headless sessions where only session state matters.
#[derive(Debug, Default)]
pub struct NullEngine {
    duration: Option<Duration>,
}

impl NullEngine {
    /// Create a null engine
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaEngine for NullEngine {
    fn load(&mut self, _file_url: &str, _token: LoadToken) -> Result<()> {
        self.duration = None;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}
}
