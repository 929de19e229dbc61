//! Volume control
//!
//! Volume is a linear level in `[0.0, 1.0]`, the range media engines accept.
//! Mute is a separate flag: toggling it never touches the stored level.

use serde::{Deserialize, Serialize};

/// Default level used when nothing else is configured
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Volume state of a playback session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

/// Coarse loudness class, used by UIs to pick a speaker glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeIndicator {
    /// Muted or at zero
    Muted,
    /// Below half volume
    Low,
    /// Half volume and above
    High,
}

impl Volume {
    /// Create new volume controller
    ///
    /// `level` is clamped to `[0.0, 1.0]`; a NaN level falls back to
    /// [`DEFAULT_VOLUME`].
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() {
            DEFAULT_VOLUME
        } else {
            level.clamp(0.0, 1.0)
        };

        Self {
            level,
            muted: false,
        }
    }

    /// Set volume level, clamped to `[0.0, 1.0]`
    ///
    /// Returns `false` and leaves the level untouched when `level` is NaN.
    /// Does not unmute.
    pub fn set_level(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Glyph class for the current state
    pub fn indicator(&self) -> VolumeIndicator {
        if self.muted || self.level == 0.0 {
            VolumeIndicator::Muted
        } else if self.level < 0.5 {
            VolumeIndicator::Low
        } else {
            VolumeIndicator::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}
