//! ParisZik Core
//!
//! Platform-agnostic domain types, collaborator traits, and error handling
//! shared by the ParisZik playback, storage and front-end crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaItem`, `RecentPlayEntry`, `Comment` and their ids
//! - **Collaborator Traits**: `ContentRepository`, `PlaybackHistoryStore`
//! - **Error Handling**: Unified `ZikError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use pariszik_core::types::{MediaItem, RecentPlayEntry};
//!
//! let item = MediaItem::new("Sous le ciel", "Nina", "https://cdn.example/sous-le-ciel.mp3");
//! let entry = RecentPlayEntry::from_item(&item, chrono::Utc::now());
//!
//! assert_eq!(entry.id, item.id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Result, ZikError};
pub use traits::{ContentRepository, PlaybackHistoryStore};
pub use types::{
    Comment, CommentId, ContentId, CreateComment, CreateContent, MediaItem, RecentPlayEntry,
    UpdateContent,
};
