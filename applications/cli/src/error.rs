/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Core(#[from] pariszik_core::ZikError),

    #[error(transparent)]
    Storage(#[from] pariszik_storage::StorageError),

    #[error(transparent)]
    Playback(#[from] pariszik_playback::PlaybackError),
}
