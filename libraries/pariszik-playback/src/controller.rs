//! Playback controller - session orchestration
//!
//! Owns the one playback session of the application and coordinates the
//! media engine, the playlist, volume, and the bookkeeping collaborators.

use crate::{
    engine::{EngineSignal, MediaEngine},
    error::{PlaybackError, Result},
    events::{ErrorKind, PlaybackEvent, PlayerUi},
    playlist::Playlist,
    types::{LoadToken, PlayOutcome, PlaybackConfig, PlaybackState, SessionSnapshot},
    volume::Volume,
};
use chrono::Utc;
use pariszik_core::{
    traits::{ContentRepository, PlaybackHistoryStore},
    types::{ContentId, MediaItem, RecentPlayEntry},
};
use std::sync::Arc;
use std::time::Duration;

/// Single playback session
///
/// State machine:
/// ```text
///            play(x)                 pause / play(current)
///   Idle ───────────────> Playing <──────────────────────> Paused
///    ^                      │  ^         resume / play(x)
///    └── load failed, ──────┘  └── engine `started`
///        nothing to restore
/// ```
///
/// Every transition is committed before the method returns or awaits a
/// collaborator, so callers never observe a half-switched item. Each load
/// gets a fresh [`LoadToken`]; engine signals with an older token are
/// discarded by [`handle_signal`](Self::handle_signal).
pub struct PlaybackController {
    // Collaborators
    engine: Box<dyn MediaEngine>,
    content: Arc<dyn ContentRepository>,
    history: Arc<dyn PlaybackHistoryStore>,

    // Session
    state: PlaybackState,
    current: Option<MediaItem>,
    fallback: Option<MediaItem>,
    playlist: Playlist,
    volume: Volume,
    initialized: bool,

    // Current load
    generation: u64,
    position: Duration,
    duration: Option<Duration>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller in the `Idle` state
    ///
    /// The engine is not touched until the first `play` (or an explicit
    /// [`init`](Self::init)).
    pub fn new(
        config: PlaybackConfig,
        engine: Box<dyn MediaEngine>,
        content: Arc<dyn ContentRepository>,
        history: Arc<dyn PlaybackHistoryStore>,
    ) -> Self {
        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        Self {
            engine,
            content,
            history,
            state: PlaybackState::Idle,
            current: None,
            fallback: None,
            playlist: Playlist::new(),
            volume,
            initialized: false,
            generation: 0,
            position: Duration::ZERO,
            duration: None,
            pending_events: Vec::new(),
        }
    }

    /// Push volume and mute state to the engine
    ///
    /// Called automatically by the first `play`. Calling it again is harmless.
    pub fn init(&mut self) {
        self.engine.set_volume(self.volume.level());
        self.engine.set_muted(self.volume.is_muted());
        if !self.initialized {
            tracing::debug!(volume = self.volume.level(), "Playback controller initialized");
        }
        self.initialized = true;
    }

    // ===== Playback Control =====

    /// Play `item`
    ///
    /// If `item` is already current and playing this pauses it instead.
    /// Otherwise the item is loaded from the start (also when it is the
    /// current, paused item), becomes current, and one recent-play entry
    /// plus one view are recorded.
    ///
    /// # Errors
    /// `MediaLoad` when the engine rejects the item. The previous item, if
    /// any, is restored paused; otherwise the session is `Idle`. Bookkeeping
    /// failures are never returned here: they are logged and queued as
    /// `ErrorKind::Repository` events.
    pub async fn play(&mut self, item: MediaItem) -> Result<PlayOutcome> {
        if !self.initialized {
            self.init();
        }

        let is_current = self.current.as_ref().is_some_and(|c| c.id == item.id);
        if is_current && self.state == PlaybackState::Playing {
            self.pause();
            return Ok(PlayOutcome::Paused);
        }

        let token = LoadToken(self.generation + 1);
        tracing::debug!(item_id = %item.id, token = %token, "Loading media");

        if let Err(err) = self.engine.load(&item.file_url, token) {
            // Refused before the resource was redirected: the previous
            // load and its token stay current
            let previous = self.current.clone();
            return Err(self.recover(item.id, err.to_string(), previous, false));
        }
        self.generation = token.0;

        if let Err(err) = self.engine.play() {
            let previous = self.current.clone();
            return Err(self.recover(item.id, err.to_string(), previous, true));
        }

        // Commit the switch in one step
        self.fallback = self.current.replace(item.clone());
        self.position = Duration::ZERO;
        self.duration = None;
        if self.playlist.current().map(|c| &c.id) != Some(&item.id) {
            self.playlist.select_id(&item.id);
        }
        self.set_state(PlaybackState::Playing);
        self.emit(PlaybackEvent::TrackChanged { item: item.clone() });

        self.record_bookkeeping(&item).await;

        Ok(PlayOutcome::Started(token))
    }

    /// Look up `id` in the content repository and play it
    pub async fn play_by_id(&mut self, id: &ContentId) -> Result<PlayOutcome> {
        let item = self
            .content
            .get_by_id(id)
            .await?
            .ok_or_else(|| PlaybackError::ContentNotFound(id.clone()))?;

        self.play(item).await
    }

    /// Play the playlist entry at `index`
    pub async fn play_at(&mut self, index: usize) -> Result<PlayOutcome> {
        if !self.playlist.select(index) {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        let item = self
            .playlist
            .get(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        self.play(item).await
    }

    /// Skip to the next playlist entry, wrapping after the last one
    ///
    /// Returns `Ok(None)` without doing anything when the playlist is empty.
    pub async fn play_next(&mut self) -> Result<Option<PlayOutcome>> {
        let Some(index) = self.playlist.advance() else {
            return Ok(None);
        };
        self.play_selected(index).await
    }

    /// Skip to the previous playlist entry, wrapping before the first one
    ///
    /// Returns `Ok(None)` without doing anything when the playlist is empty.
    pub async fn play_previous(&mut self) -> Result<Option<PlayOutcome>> {
        let Some(index) = self.playlist.retreat() else {
            return Ok(None);
        };
        self.play_selected(index).await
    }

    async fn play_selected(&mut self, index: usize) -> Result<Option<PlayOutcome>> {
        match self.playlist.get(index).cloned() {
            Some(item) => self.play(item).await.map(Some),
            None => Ok(None),
        }
    }

    /// Toggle between playing and paused (no-op when idle)
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Playing => {
                self.pause();
                Ok(())
            }
            PlaybackState::Paused => self.resume(),
        }
    }

    /// Pause playback (no-op unless playing)
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.engine.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Resume a paused item in place
    ///
    /// No-op when idle or already playing. Unlike `play`, this records
    /// neither a view nor a recent play.
    pub fn resume(&mut self) -> Result<()> {
        if self.state != PlaybackState::Paused {
            return Ok(());
        }

        if let Err(err) = self.engine.play() {
            tracing::warn!(error = %err, "Failed to resume playback");
            self.emit(PlaybackEvent::Error {
                kind: ErrorKind::Playback,
                message: err.to_string(),
            });
            return Err(PlaybackError::Engine(err.to_string()));
        }

        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    // ===== Engine Signals =====

    /// Apply a lifecycle signal reported by the media engine
    ///
    /// Returns `Ok(false)` when the signal was discarded because `token`
    /// belongs to an earlier load or nothing is loaded.
    ///
    /// # Errors
    /// `MediaLoad` for a `Failed` signal (after recovering), or whatever
    /// the automatic skip on `Ended` returns.
    pub async fn handle_signal(&mut self, token: LoadToken, signal: EngineSignal) -> Result<bool> {
        if token != self.current_token() {
            tracing::debug!(
                token = %token,
                current = %self.current_token(),
                ?signal,
                "Discarding signal from superseded load"
            );
            return Ok(false);
        }

        let Some(current_id) = self.current.as_ref().map(|c| c.id.clone()) else {
            return Ok(false);
        };

        match signal {
            EngineSignal::Started => {
                self.set_state(PlaybackState::Playing);
            }
            EngineSignal::Paused => {
                self.set_state(PlaybackState::Paused);
            }
            EngineSignal::Ended => {
                tracing::debug!(item_id = %current_id, "Media ended");
                if let Some(duration) = self.duration {
                    self.position = duration;
                }
                self.set_state(PlaybackState::Paused);
                self.play_next().await?;
            }
            EngineSignal::TimeUpdated { position } => {
                self.position = position;
                self.emit_progress();
            }
            EngineSignal::MetadataReady { duration } => {
                self.duration = Some(duration);
                self.emit_progress();
            }
            EngineSignal::Failed { reason } => {
                let fallback = self.fallback.take();
                return Err(self.recover(current_id, reason, fallback, true));
            }
        }

        Ok(true)
    }

    // ===== Seek =====

    /// Seek to a fraction of the duration
    ///
    /// `fraction` is clamped to `[0, 1]`. Returns `Ok(false)` without
    /// touching anything when nothing is loaded, the duration is not known
    /// yet, or `fraction` is NaN.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<bool> {
        if fraction.is_nan() {
            tracing::debug!("Ignoring seek to NaN fraction");
            return Ok(false);
        }
        let Some(duration) = self.seekable_duration() else {
            return Ok(false);
        };

        let position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.apply_seek(position)
    }

    /// Seek to an absolute position, clamped to the duration
    ///
    /// Same no-op conditions as [`seek_to_fraction`](Self::seek_to_fraction).
    pub fn seek_to(&mut self, position: Duration) -> Result<bool> {
        let Some(duration) = self.seekable_duration() else {
            return Ok(false);
        };

        self.apply_seek(position.min(duration))
    }

    fn seekable_duration(&self) -> Option<Duration> {
        if !self.state.is_loaded() {
            return None;
        }

        match self.duration.or_else(|| self.engine.duration()) {
            Some(duration) if !duration.is_zero() => Some(duration),
            _ => {
                tracing::debug!("Ignoring seek: duration unknown");
                None
            }
        }
    }

    fn apply_seek(&mut self, position: Duration) -> Result<bool> {
        self.engine.set_current_time(position)?;
        self.position = position;
        self.emit_progress();
        Ok(true)
    }

    // ===== Volume =====

    /// Set volume, clamped to `[0, 1]`
    ///
    /// Does not unmute. Returns `false` (nothing changed) for NaN.
    pub fn set_volume(&mut self, volume: f32) -> bool {
        if !self.volume.set_level(volume) {
            tracing::debug!("Ignoring NaN volume");
            return false;
        }

        self.engine.set_volume(self.volume.level());
        self.emit_volume_changed();
        true
    }

    /// Toggle mute, returning the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.volume.toggle_mute();
        self.engine.set_muted(muted);
        self.emit_volume_changed();
        muted
    }

    /// Get current volume level (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Full volume state
    pub fn volume_state(&self) -> &Volume {
        &self.volume
    }

    // ===== Favorites =====

    /// Flip the favorite flag of the current item
    ///
    /// Returns `Ok(None)` when idle, otherwise the new flag. Playback state
    /// is never affected.
    ///
    /// # Errors
    /// `Repository` when the content repository fails; an
    /// `ErrorKind::Repository` event is queued as well.
    pub async fn toggle_favorite(&mut self) -> Result<Option<bool>> {
        let Some(id) = self.current.as_ref().map(|c| c.id.clone()) else {
            return Ok(None);
        };

        match self.content.toggle_favorite(&id).await {
            Ok(is_favorite) => {
                for item in self
                    .current
                    .iter_mut()
                    .chain(self.fallback.iter_mut())
                    .filter(|item| item.id == id)
                {
                    item.is_favorite = is_favorite;
                }
                for item in self.playlist.entries_mut(&id) {
                    item.is_favorite = is_favorite;
                }

                self.emit(PlaybackEvent::FavoriteChanged { id, is_favorite });
                Ok(Some(is_favorite))
            }
            Err(err) => {
                tracing::warn!(item_id = %id, error = %err, "Failed to toggle favorite");
                self.emit(PlaybackEvent::Error {
                    kind: ErrorKind::Repository,
                    message: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    // ===== Playlist Management =====

    /// Replace the playlist
    ///
    /// `start` selects an entry without playing it; out-of-range means none.
    pub fn set_playlist(&mut self, items: Vec<MediaItem>, start: Option<usize>) {
        self.playlist.set_items(items, start);
    }

    /// Append entries to the playlist
    pub fn append_to_playlist(&mut self, items: Vec<MediaItem>) {
        self.playlist.append(items);
    }

    /// Remove playlist entry by index
    ///
    /// Does not stop the current item even if it was that entry.
    pub fn remove_from_playlist(&mut self, index: usize) -> Result<MediaItem> {
        self.playlist
            .remove(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))
    }

    /// Empty the playlist (the current item keeps playing)
    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Selected playlist index (`None` = nothing selected)
    pub fn current_index(&self) -> Option<usize> {
        self.playlist.current_index()
    }

    // ===== State Queries =====

    /// Get current session state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if output is running
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Get current item
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current.as_ref()
    }

    /// Last reported position
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the current item, once known
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Whether the engine has been initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Token of the most recent load
    pub fn current_token(&self) -> LoadToken {
        LoadToken(self.generation)
    }

    /// Copy of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            current: self.current.clone(),
            playlist: self.playlist.items().to_vec(),
            current_index: self.playlist.current_index(),
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            position: self.position,
            duration: self.duration,
            initialized: self.initialized,
        }
    }

    /// Recent plays from the history store, most recent first
    pub async fn recent_plays(&self) -> Result<Vec<RecentPlayEntry>> {
        Ok(self.history.recent_plays().await?)
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Drain pending events into a UI binding, returning how many were sent
    pub fn dispatch_events(&mut self, ui: &mut dyn PlayerUi) -> usize {
        let events = self.drain_events();
        for event in &events {
            event.dispatch(ui);
        }
        events.len()
    }

    // ===== Internals =====

    fn next_token(&mut self) -> LoadToken {
        self.generation += 1;
        LoadToken(self.generation)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }

        tracing::debug!(from = ?self.state, to = ?state, "Playback state changed");
        let was_playing = self.state == PlaybackState::Playing;
        self.state = state;

        let is_playing = state == PlaybackState::Playing;
        if was_playing != is_playing {
            self.emit(PlaybackEvent::PlayStateChanged { is_playing });
        }
    }

    /// Return to the last good state after a failed load
    ///
    /// `redirected` tells whether the engine resource may already point at
    /// the failed item, in which case the restored item is reloaded (paused).
    fn recover(
        &mut self,
        failed_id: ContentId,
        reason: String,
        restore: Option<MediaItem>,
        redirected: bool,
    ) -> PlaybackError {
        tracing::warn!(item_id = %failed_id, %reason, "Media load failed");

        match restore {
            Some(item) => {
                if redirected {
                    let token = self.next_token();
                    self.position = Duration::ZERO;
                    self.duration = None;
                    if let Err(err) = self.engine.load(&item.file_url, token) {
                        tracing::warn!(item_id = %item.id, error = %err, "Could not reload previous item");
                    }
                } else {
                    self.engine.pause();
                }

                if self.playlist.current().map(|c| &c.id) != Some(&item.id) {
                    self.playlist.select_id(&item.id);
                }

                let changed = self.current.as_ref().map(|c| &c.id) != Some(&item.id);
                self.current = Some(item.clone());
                self.set_state(PlaybackState::Paused);
                if changed {
                    self.emit(PlaybackEvent::TrackChanged { item });
                }
            }
            None => {
                if redirected {
                    self.engine.pause();
                }
                self.current = None;
                self.position = Duration::ZERO;
                self.duration = None;
                self.set_state(PlaybackState::Idle);
            }
        }

        self.emit(PlaybackEvent::Error {
            kind: ErrorKind::Playback,
            message: format!("Cannot play {}: {}", failed_id, reason),
        });

        PlaybackError::MediaLoad {
            item_id: failed_id,
            reason,
        }
    }

    async fn record_bookkeeping(&mut self, item: &MediaItem) {
        let entry = RecentPlayEntry::from_item(item, Utc::now());
        if let Err(err) = self.history.record_play(entry).await {
            tracing::warn!(item_id = %item.id, error = %err, "Failed to record recent play");
            self.emit(PlaybackEvent::Error {
                kind: ErrorKind::Repository,
                message: err.to_string(),
            });
        }

        if let Err(err) = self.content.increment_views(&item.id).await {
            tracing::warn!(item_id = %item.id, error = %err, "Failed to increment views");
            self.emit(PlaybackEvent::Error {
                kind: ErrorKind::Repository,
                message: err.to_string(),
            });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_progress(&mut self) {
        self.emit(PlaybackEvent::Progress {
            position: self.position,
            duration: self.duration,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NullEngine;
    use crate::history::MemoryHistoryStore;
    use async_trait::async_trait;
    use pariszik_core::ZikError;

    struct NoContent;

    #[async_trait]
    impl ContentRepository for NoContent {
        async fn get_by_id(&self, _id: &ContentId) -> pariszik_core::Result<Option<MediaItem>> {
            Ok(None)
        }

        async fn increment_views(&self, id: &ContentId) -> pariszik_core::Result<()> {
            Err(ZikError::not_found("Content", id.as_str()))
        }

        async fn toggle_favorite(&self, id: &ContentId) -> pariszik_core::Result<bool> {
            Err(ZikError::not_found("Content", id.as_str()))
        }
    }

    fn create_controller() -> PlaybackController {
        PlaybackController::new(
            PlaybackConfig::default(),
            Box::new(NullEngine::new()),
            Arc::new(NoContent),
            Arc::new(MemoryHistoryStore::new()),
        )
    }

    fn create_test_item(id: &str) -> MediaItem {
        MediaItem::new(format!("Track {}", id), "Test Artist", format!("/media/{}.mp3", id))
            .with_id(id)
    }

    #[test]
    fn create_playback_controller() {
        let controller = create_controller();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.volume(), 0.7);
        assert!(!controller.is_initialized());
        assert!(controller.current_item().is_none());
        assert_eq!(controller.snapshot().display_index(), -1);
    }

    #[test]
    fn muted_config_starts_muted() {
        let config = PlaybackConfig {
            muted: true,
            ..Default::default()
        };
        let controller = PlaybackController::new(
            config,
            Box::new(NullEngine::new()),
            Arc::new(NoContent),
            Arc::new(MemoryHistoryStore::new()),
        );
        assert!(controller.is_muted());
    }

    #[test]
    fn idle_controls_are_noops() {
        let mut controller = create_controller();

        controller.toggle_play_pause().unwrap();
        controller.pause();
        controller.resume().unwrap();

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.has_pending_events());
        assert!(!controller.seek_to_fraction(0.5).unwrap());
    }

    #[tokio::test]
    async fn play_initializes_lazily() {
        let mut controller = create_controller();
        controller.play(create_test_item("a")).await.unwrap();
        assert!(controller.is_initialized());
        assert!(controller.is_playing());
    }

    #[tokio::test]
    async fn failed_view_increment_does_not_stop_playback() {
        let mut controller = create_controller();

        let outcome = controller.play(create_test_item("a")).await.unwrap();
        assert!(matches!(outcome, PlayOutcome::Started(_)));
        assert!(controller.is_playing());

        let events = controller.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            PlaybackEvent::Error {
                kind: ErrorKind::Repository,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn play_by_unknown_id_is_not_found() {
        let mut controller = create_controller();
        let err = controller.play_by_id(&ContentId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, PlaybackError::ContentNotFound(_)));
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn play_at_out_of_bounds() {
        let mut controller = create_controller();
        controller.set_playlist(vec![create_test_item("a")], None);

        let err = controller.play_at(3).await.unwrap_err();
        assert!(matches!(err, PlaybackError::IndexOutOfBounds(3)));
        assert_eq!(controller.current_index(), None);
    }

    #[test]
    fn set_volume_emits_event() {
        let mut controller = create_controller();
        assert!(controller.set_volume(0.25));

        assert_eq!(
            controller.drain_events(),
            vec![PlaybackEvent::VolumeChanged {
                volume: 0.25,
                muted: false
            }]
        );
    }
}
