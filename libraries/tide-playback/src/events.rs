//! Controller events
//!
//! Event-based communication for presentation. The controller queues events
//! as transitions happen; the UI drains them:
//! - Snapshot after every state-affecting transition
//! - Track changes (every source load)
//! - Track finished (end of track reached)

use crate::types::PlaybackSnapshot;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Consolidated playback state changed
    Snapshot(PlaybackSnapshot),

    /// A new source was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track
        previous_track_id: String,
    },

    /// Track played through to its end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },
}

impl ControllerEvent {
    /// Snapshot carried by this event, if any
    pub fn snapshot(&self) -> Option<&PlaybackSnapshot> {
        match self {
            ControllerEvent::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
