//! Headless playback session
//!
//! Couples a [`PlaybackController`] with the signal channel of a
//! [`HeadlessEngine`] so engine signals are fed back with their tokens.

use crate::engine::{HeadlessEngine, TaggedSignal};
use crate::error::Result;
use pariszik_core::{ContentRepository, MediaItem, PlaybackHistoryStore};
use pariszik_playback::{PlaybackConfig, PlaybackController, SessionSnapshot};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub struct HeadlessSession {
    controller: PlaybackController,
    signals: UnboundedReceiver<TaggedSignal>,
}

impl HeadlessSession {
    pub fn new(
        config: PlaybackConfig,
        engine: HeadlessEngine,
        signals: UnboundedReceiver<TaggedSignal>,
        content: Arc<dyn ContentRepository>,
        history: Arc<dyn PlaybackHistoryStore>,
    ) -> Self {
        Self {
            controller: PlaybackController::new(config, Box::new(engine), content, history),
            signals,
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// Feed every queued engine signal to the controller
    ///
    /// Returns how many signals were applied (stale ones are not counted).
    pub async fn pump_signals(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((token, signal)) = self.signals.try_recv() {
            match self.controller.handle_signal(token, signal).await {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(error = %err, "Engine signal failed"),
            }
        }
        applied
    }

    /// Load `items` as the playlist, play the first entry, then skip
    /// forward `skip` times
    ///
    /// Items that cannot be played are reported through the event queue
    /// and skipped over; repository failures abort.
    pub async fn play_playlist(&mut self, items: Vec<MediaItem>, skip: usize) -> Result<SessionSnapshot> {
        self.controller.set_playlist(items, None);

        for _ in 0..=skip {
            match self.controller.play_next().await {
                Ok(_) => {}
                Err(err) if err.is_media_failure() => {
                    tracing::warn!(error = %err, "Skipping unplayable item");
                }
                Err(err) => return Err(err.into()),
            }
            self.pump_signals().await;
        }

        Ok(self.controller.snapshot())
    }
}
