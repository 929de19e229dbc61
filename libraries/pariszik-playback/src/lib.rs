//! ParisZik - Playback Control
//!
//! Platform-agnostic playback session control for ParisZik.
//!
//! This crate provides:
//! - One playback session (idle / playing / paused) over a single media engine
//! - A navigable playlist with wrap-around next/previous
//! - Volume control (linear 0.0-1.0, independent mute)
//! - Recent-plays list (10 entries, most recent first, no duplicates)
//! - Stale engine signal rejection through load tokens
//! - Typed UI callbacks
//!
//! # Architecture
//!
//! `pariszik-playback` does not know how media is fetched or where content
//! lives:
//! - Media output is a [`MediaEngine`] supplied by the platform
//! - Content and recent plays go through the `pariszik-core` traits,
//!   implemented by `pariszik-storage` or by in-memory stand-ins
//!
//! # Example: Session Setup
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use pariszik_core::{ContentId, ContentRepository, MediaItem};
//! use pariszik_playback::{MemoryHistoryStore, NullEngine, PlaybackConfig, PlaybackController};
//! use std::sync::Arc;
//!
//! struct Catalog;
//!
//! #[async_trait]
//! impl ContentRepository for Catalog {
//!     async fn get_by_id(&self, _id: &ContentId) -> pariszik_core::Result<Option<MediaItem>> {
//!         Ok(None)
//!     }
//!
//!     async fn increment_views(&self, _id: &ContentId) -> pariszik_core::Result<()> {
//!         Ok(())
//!     }
//!
//!     async fn toggle_favorite(&self, _id: &ContentId) -> pariszik_core::Result<bool> {
//!         Ok(true)
//!     }
//! }
//!
//! let mut controller = PlaybackController::new(
//!     PlaybackConfig::default(),
//!     Box::new(NullEngine::new()),
//!     Arc::new(Catalog),
//!     Arc::new(MemoryHistoryStore::new()),
//! );
//!
//! controller.set_volume(0.5);
//! controller.set_playlist(
//!     vec![
//!         MediaItem::new("Intro", "DJ Seine", "/media/intro.mp3"),
//!         MediaItem::new("Outro", "DJ Seine", "/media/outro.mp3"),
//!     ],
//!     None,
//! );
//!
//! // Inside an async context:
//! // controller.play_next().await?;   // plays "Intro"
//! // controller.play_previous().await?; // wraps to "Outro"
//! ```

mod controller;
mod engine;
mod error;
mod events;
mod history;
mod playlist;
mod time;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use engine::{EngineSignal, MediaEngine, NullEngine};
pub use error::{PlaybackError, Result};
pub use events::{ErrorKind, PlaybackEvent, PlayerUi};
pub use history::{MemoryHistoryStore, RecentPlays};
pub use playlist::Playlist;
pub use time::{format_duration, format_time};
pub use types::{LoadToken, PlayOutcome, PlaybackConfig, PlaybackState, SessionSnapshot};
pub use volume::{Volume, VolumeIndicator, DEFAULT_VOLUME};
