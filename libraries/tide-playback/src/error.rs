//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Controller was constructed without any tracks
    #[error("Queue is empty")]
    EmptyQueue,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The media primitive refused to start playback
    #[error("Playback could not start: {0}")]
    PlaybackStart(String),

    /// Media adapter error
    #[error("Media adapter error: {0}")]
    Adapter(String),

    /// The player runtime thread has stopped
    #[error("Player runtime is no longer running")]
    RuntimeClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
