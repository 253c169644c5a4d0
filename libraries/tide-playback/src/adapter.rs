//! Media primitive adapter
//!
//! Abstracts the playback engine that actually fetches, decodes and outputs
//! audio (an HTML media element, a CPAL pipeline, a test double...). The
//! controller only issues commands through [`MediaAdapter`] and consumes the
//! [`TaggedEvent`]s the engine reports back.

use crate::error::{PlaybackError, Result};
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

/// Monotonic load counter
///
/// Every source load gets a fresh generation. Events carry the generation of
/// the load they belong to so that events from an abandoned load can be
/// recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle events reported by the media primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Source metadata is available (duration in seconds, 0 if unknown)
    MetadataReady { duration: f64 },

    /// Playback position moved (seconds)
    TimeUpdate { current_time: f64 },

    /// Audio actually started
    PlaybackStarted,

    /// Audio halted
    PlaybackPaused,

    /// Buffer underrun, waiting for data
    Stalled,

    /// Reached end of the source
    Ended,

    /// A previous `play()` request failed after it was accepted
    PlayRejected { reason: String },
}

/// A media event stamped with the generation of the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEvent {
    pub generation: Generation,
    pub event: MediaEvent,
}

impl TaggedEvent {
    pub fn new(generation: Generation, event: MediaEvent) -> Self {
        Self { generation, event }
    }
}

/// Playback engine driven by the controller
///
/// Implementors must not call back into the controller synchronously; events
/// are delivered separately (see [`AdapterEventSender`]). None of the methods
/// are expected to block until the engine has completed the request.
pub trait MediaAdapter {
    /// Start preparing `source`
    ///
    /// All events for this source must be tagged with `generation`.
    fn load(&mut self, source: &str, generation: Generation);

    /// Request playback start
    ///
    /// # Returns
    /// * `Ok(())` - Request accepted; `PlaybackStarted` or `PlayRejected` follows
    /// * `Err(_)` - Rejected immediately (no source, autoplay policy, ...)
    fn play(&mut self) -> Result<()>;

    /// Request playback halt
    fn pause(&mut self);

    /// Move the playback position (seconds)
    fn seek(&mut self, position: f64);

    /// Set output gain (0.0-1.0)
    fn set_volume(&mut self, gain: f64);
}

impl<A: MediaAdapter + ?Sized> MediaAdapter for Box<A> {
    fn load(&mut self, source: &str, generation: Generation) {
        (**self).load(source, generation);
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek(&mut self, position: f64) {
        (**self).seek(position);
    }

    fn set_volume(&mut self, gain: f64) {
        (**self).set_volume(gain);
    }
}

/// Handle an adapter uses to report events to the player runtime
#[derive(Debug, Clone)]
pub struct AdapterEventSender {
    tx: Sender<TaggedEvent>,
}

impl AdapterEventSender {
    pub(crate) fn new(tx: Sender<TaggedEvent>) -> Self {
        Self { tx }
    }

    /// Report an event for the load identified by `generation`
    pub fn emit(&self, generation: Generation, event: MediaEvent) -> Result<()> {
        self.tx
            .send(TaggedEvent::new(generation, event))
            .map_err(|_| PlaybackError::RuntimeClosed)
    }
}
