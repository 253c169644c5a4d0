//! Tide Player - Playback Control
//!
//! Platform-agnostic transport controller for a single-stream audio player.
//!
//! This crate provides:
//! - Track queue with sequential and shuffle navigation
//! - Transport state machine (paused, loading, playing)
//! - Stale-event suppression through load generations
//! - Repeat (restart the same track) and shuffle modes
//! - Seek and volume mapping from normalized [0, 1] input
//! - A runtime that drives the controller on its own thread
//!
//! # Architecture
//!
//! `tide-playback` never touches audio I/O. The playback engine is reached
//! through the [`MediaAdapter`] trait; the engine reports its lifecycle back
//! as [`TaggedEvent`]s. Only the controller calls the adapter.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use tide_playback::{
//!     ControllerConfig, Generation, MediaAdapter, MediaEvent, PlaybackController,
//!     PlaybackStatus, Result, TaggedEvent, Track,
//! };
//!
//! // Implement MediaAdapter for your platform
//! struct SilentEngine;
//!
//! impl MediaAdapter for SilentEngine {
//!     fn load(&mut self, _source: &str, _generation: Generation) {}
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: f64) {}
//!     fn set_volume(&mut self, _gain: f64) {}
//! }
//!
//! let tracks = vec![
//!     Track::new("a", "First", "Artist", "https://cdn.example/a.mp3"),
//!     Track::new("b", "Second", "Artist", "https://cdn.example/b.mp3"),
//! ];
//! let mut controller =
//!     PlaybackController::new(tracks, SilentEngine, ControllerConfig::default())?;
//!
//! controller.toggle_play();
//! assert_eq!(controller.status(), PlaybackStatus::Loading);
//!
//! // The engine confirms playback asynchronously
//! let generation = controller.generation();
//! controller.handle_event(TaggedEvent::new(generation, MediaEvent::PlaybackStarted));
//! assert_eq!(controller.status(), PlaybackStatus::Playing);
//!
//! // Events for a superseded load are ignored
//! controller.next();
//! assert!(!controller.handle_event(TaggedEvent::new(generation, MediaEvent::Ended)));
//! # Ok::<(), tide_playback::PlaybackError>(())
//! ```

mod adapter;
mod controller;
mod error;
mod events;
pub mod progress;
mod queue;
mod runtime;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use adapter::{AdapterEventSender, Generation, MediaAdapter, MediaEvent, TaggedEvent};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::ControllerEvent;
pub use progress::format_duration;
pub use queue::{Direction, Queue};
pub use runtime::{PlayerCommand, PlayerRuntime};
pub use types::{ControllerConfig, PlaybackSnapshot, PlaybackStatus, Track};
pub use volume::Volume;
