//! Headless media engine
//!
//! Validates media references without decoding anything and reports
//! lifecycle signals over a channel, tagged with the load token.

use pariszik_playback::{EngineSignal, LoadToken, MediaEngine, PlaybackError};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Signal tagged with the load it belongs to
pub type TaggedSignal = (LoadToken, EngineSignal);

/// Engine for terminals and tests: accepts `http(s)://` URLs and
/// existing local files
pub struct HeadlessEngine {
    signals: UnboundedSender<TaggedSignal>,
    token: Option<LoadToken>,
    nominal_duration: Option<Duration>,
    playing: bool,
    volume: f32,
    muted: bool,
}

impl HeadlessEngine {
    /// Create an engine and the receiving end of its signals
    pub fn new() -> (Self, UnboundedReceiver<TaggedSignal>) {
        let (signals, receiver) = mpsc::unbounded_channel();
        let engine = Self {
            signals,
            token: None,
            nominal_duration: None,
            playing: false,
            volume: 1.0,
            muted: false,
        };
        (engine, receiver)
    }

    /// Report `duration` as metadata for every load
    #[must_use]
    pub fn with_nominal_duration(mut self, duration: Duration) -> Self {
        self.nominal_duration = Some(duration);
        self
    }

    fn send(&self, signal: EngineSignal) {
        if let Some(token) = self.token {
            // Receiver gone means the session is over
            let _ = self.signals.send((token, signal));
        }
    }
}

/// Whether `file_url` is something this engine can open
pub fn is_playable(file_url: &str) -> bool {
    let url = file_url.trim();
    if let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        return !rest.is_empty();
    }

    let path = url.strip_prefix("file://").unwrap_or(url);
    !path.is_empty() && Path::new(path).is_file()
}

impl MediaEngine for HeadlessEngine {
    fn load(&mut self, file_url: &str, token: LoadToken) -> pariszik_playback::Result<()> {
        if !is_playable(file_url) {
            return Err(PlaybackError::Engine(format!(
                "unsupported or missing media: {}",
                file_url
            )));
        }

        tracing::debug!(%token, file_url, "Headless load");
        self.token = Some(token);
        self.playing = false;

        if let Some(duration) = self.nominal_duration {
            self.send(EngineSignal::MetadataReady { duration });
        }
        Ok(())
    }

    fn play(&mut self) -> pariszik_playback::Result<()> {
        if self.token.is_none() {
            return Err(PlaybackError::Engine("nothing loaded".to_string()));
        }
        self.playing = true;
        self.send(EngineSignal::Started);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.send(EngineSignal::Paused);
        }
    }

    fn set_current_time(&mut self, position: Duration) -> pariszik_playback::Result<()> {
        self.send(EngineSignal::TimeUpdated { position });
        Ok(())
    }

    fn duration(&self) -> Option<Duration> {
        self.token.and(self.nominal_duration)
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_references() {
        assert!(is_playable("https://cdn.example/track.mp3"));
        assert!(is_playable("http://radio.example/live"));
        assert!(!is_playable("https://"));
        assert!(!is_playable(""));
        assert!(!is_playable("/definitely/not/here.mp3"));

        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(is_playable(file.path().to_str().unwrap()));
    }

    #[test]
    fn signals_carry_load_token() {
        let (engine, mut signals) = HeadlessEngine::new();
        let mut engine = engine.with_nominal_duration(Duration::from_secs(90));

        engine
            .load("https://cdn.example/a.mp3", LoadToken(7))
            .unwrap();
        engine.play().unwrap();
        engine.pause();

        assert_eq!(
            signals.try_recv().unwrap(),
            (
                LoadToken(7),
                EngineSignal::MetadataReady {
                    duration: Duration::from_secs(90)
                }
            )
        );
        assert_eq!(signals.try_recv().unwrap(), (LoadToken(7), EngineSignal::Started));
        assert_eq!(signals.try_recv().unwrap(), (LoadToken(7), EngineSignal::Paused));
        assert!(signals.try_recv().is_err());
    }

    #[test]
    fn rejects_missing_file() {
        let (mut engine, _signals) = HeadlessEngine::new();
        assert!(engine.load("/missing.mp3", LoadToken(1)).is_err());
        assert!(engine.play().is_err());
    }
}
