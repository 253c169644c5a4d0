//! Core types for playback control

use serde::{Deserialize, Serialize};

/// A playable track
///
/// Contains display metadata and the source reference handed to the media
/// adapter. Tracks are immutable once the queue owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover artwork location (optional)
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Playable source reference for the media adapter
    pub audio_url: String,

    /// Duration in seconds, used only until the real duration is known
    #[serde(default)]
    pub duration_hint: Option<f64>,
}

impl Track {
    /// Create a track without cover art or duration hint
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_url: None,
            audio_url: audio_url.into(),
            duration_hint: None,
        }
    }

    pub fn with_cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    pub fn with_duration_hint(mut self, seconds: f64) -> Self {
        self.duration_hint = Some(seconds);
        self
    }
}

/// Transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// Halted, either never started or paused mid-track
    Paused,

    /// Waiting on the media primitive (source load, play request, stall)
    Loading,

    /// Audio is audible
    Playing,
}

/// Consolidated, read-only playback state for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,

    /// Current position in seconds (>= 0)
    pub current_time: f64,

    /// Track duration in seconds (0 = unknown)
    pub duration: f64,

    /// Output gain in [0, 1]
    pub volume: f64,

    pub shuffle: bool,
    pub repeat: bool,

    /// Position of `active_track` in the queue
    pub track_index: usize,

    pub active_track: Track,
}

impl PlaybackSnapshot {
    /// Position as a ratio of the duration, 0 while the duration is unknown
    pub fn progress(&self) -> f64 {
        crate::progress::seconds_to_ratio(self.current_time, self.duration)
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Initial gain (0.0-1.0, default: 1.0)
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Queue index that is active at construction (default: 0)
    #[serde(default)]
    pub start_index: usize,

    /// Keep playing across track changes (default: false)
    ///
    /// When enabled, a track change caused by end-of-track, or a skip while
    /// the user wants audio, starts the new track once its metadata arrives.
    #[serde(default)]
    pub continue_playback: bool,

    /// Seed for the shuffle RNG (default: entropy)
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

fn default_volume() -> f64 {
    1.0
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            start_index: 0,
            continue_playback: false,
            shuffle_seed: None,
        }
    }
}
