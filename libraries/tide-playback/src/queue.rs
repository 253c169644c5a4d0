//! Track queue and navigation policy
//!
//! The queue is an immutable, non-empty list of tracks plus a cursor:
//! ```text
//!   0: Track A
//! > 1: Track B   <- current_index
//!   2: Track C
//! ```
//! Sequential navigation wraps around at both ends. Shuffle navigation draws a
//! random track other than the current one, in either direction.

use crate::error::{PlaybackError, Result};
use crate::shuffle::pick_random_index;
use crate::types::Track;
use rand::Rng;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Ordered track list with a current-index cursor
#[derive(Debug, Clone)]
pub struct Queue {
    tracks: Vec<Track>,
    current: usize,
}

impl Queue {
    /// Create a queue positioned on the first track
    ///
    /// # Returns
    /// * `Err(PlaybackError::EmptyQueue)` - No tracks supplied
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyQueue);
        }

        Ok(Self { tracks, current: 0 })
    }

    /// Track under the cursor
    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    /// Cursor position
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Move the cursor
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }

        self.current = index;
        Ok(())
    }

    /// Compute the index navigation would move to
    ///
    /// Does not move the cursor; the controller selects the returned index.
    pub fn advance<R: Rng + ?Sized>(&self, direction: Direction, shuffle: bool, rng: &mut R) -> usize {
        let len = self.tracks.len();

        if shuffle {
            // Previous under shuffle is just another random pick
            return pick_random_index(len, self.current, rng);
        }

        match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Previous => (self.current + len - 1) % len,
        }
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed queue
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
