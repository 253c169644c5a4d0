//! Playback controller - transport state machine
//!
//! Reconciles user commands (play, pause, seek, skip, modes, volume) with the
//! asynchronous lifecycle reported by the media adapter.
//!
//! Transitions:
//! ```text
//! select_track        any      -> Loading  (new generation, adapter.load)
//! MetadataReady       Loading  -> Paused   (unless the user wants audio)
//! toggle_play (play)  any      -> Loading  (adapter.play, rejection -> Paused)
//! toggle_play (pause) any      -> Paused   (adapter.pause)
//! PlaybackStarted     any      -> Playing
//! PlaybackPaused      any      -> Paused
//! Stalled             Playing  -> Loading
//! Ended               any      -> Loading  (repeat: seek(0) + play, else next track)
//! PlayRejected        any      -> Paused
//! ```
//!
//! Every event is tagged with the generation of the load it belongs to;
//! events from any other generation are discarded.

use crate::{
    adapter::{Generation, MediaAdapter, MediaEvent, TaggedEvent},
    error::Result,
    events::ControllerEvent,
    progress,
    queue::{Direction, Queue},
    types::{ControllerConfig, PlaybackSnapshot, PlaybackStatus, Track},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Transport state machine driving a [`MediaAdapter`]
///
/// The controller is the only caller of the adapter. It is single-threaded:
/// commands and adapter events are applied one at a time through `&mut self`.
pub struct PlaybackController<A: MediaAdapter> {
    adapter: A,
    queue: Queue,

    // Transport
    status: PlaybackStatus,
    current_time: f64,
    duration: f64,
    generation: Generation,

    // User intent: set by "play", cleared by "pause" and by failures
    play_requested: bool,
    // Issue play() once the loading source reports metadata
    autoplay_pending: bool,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: bool,
    continue_playback: bool,
    rng: StdRng,

    // Event queue for presentation
    pending_events: Vec<ControllerEvent>,
    last_published: Option<PlaybackSnapshot>,
}

impl<A: MediaAdapter> PlaybackController<A> {
    /// Create a controller over `tracks`
    ///
    /// Applies the initial volume and loads the start track (generation 0)
    /// while staying paused.
    ///
    /// # Returns
    /// * `Err(PlaybackError::EmptyQueue)` - No tracks supplied
    /// * `Err(PlaybackError::IndexOutOfBounds)` - `start_index` outside the queue
    pub fn new(tracks: Vec<Track>, adapter: A, config: ControllerConfig) -> Result<Self> {
        let mut queue = Queue::new(tracks)?;
        queue.set_current(config.start_index)?;

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            adapter,
            queue,
            status: PlaybackStatus::Paused,
            current_time: 0.0,
            duration: 0.0,
            generation: Generation::default(),
            play_requested: false,
            autoplay_pending: false,
            volume: Volume::new(config.volume),
            shuffle: false,
            repeat: false,
            continue_playback: config.continue_playback,
            rng,
            pending_events: Vec::new(),
            last_published: None,
        };

        controller.adapter.set_volume(controller.volume.gain());
        controller
            .adapter
            .load(&controller.queue.current().audio_url, controller.generation);

        debug!(
            tracks = controller.queue.len(),
            start_index = config.start_index,
            "Playback controller created"
        );

        controller.publish();
        Ok(controller)
    }

    // ===== Transport Commands =====

    /// Play if the user last asked for silence, pause otherwise
    pub fn toggle_play(&mut self) {
        if self.play_requested {
            self.play_requested = false;
            self.autoplay_pending = false;
            self.status = PlaybackStatus::Paused;
            self.adapter.pause();
        } else {
            self.play_requested = true;
            self.status = PlaybackStatus::Loading;
            self.request_play();
        }

        self.publish();
    }

    /// Skip to the next track per the navigation policy
    ///
    /// No-op on a single-track queue.
    pub fn next(&mut self) {
        self.navigate(Direction::Next);
    }

    /// Go to the previous track per the navigation policy
    ///
    /// Under shuffle this is another random pick.
    pub fn previous(&mut self) {
        self.navigate(Direction::Previous);
    }

    /// Load the track at `index`
    ///
    /// Always starts a new generation, even when `index` is already active.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let autoplay = self.continue_playback && self.play_requested;
        self.load_index(index, autoplay)
    }

    /// Seek to a ratio of the track duration
    ///
    /// No-op while the duration is unknown. The displayed position moves
    /// immediately instead of waiting for the next time update.
    pub fn seek_to(&mut self, ratio: f64) {
        if !progress::is_known_duration(self.duration) {
            debug!(ratio, "Ignoring seek, duration unknown");
            return;
        }

        let position = progress::ratio_to_seconds(ratio, self.duration);
        self.adapter.seek(position);
        self.current_time = position;
        self.publish();
    }

    /// Set output gain, clamped into [0, 1]
    ///
    /// Applies in every transport state. Returns the effective gain.
    pub fn set_volume(&mut self, gain: f64) -> f64 {
        let gain = self.volume.set(gain);
        self.adapter.set_volume(gain);
        self.publish();
        gain
    }

    // ===== Modes =====

    /// Flip shuffle; returns the new value
    ///
    /// Only changes the policy used by the next navigation.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        debug!(shuffle = self.shuffle, "Shuffle toggled");
        self.publish();
        self.shuffle
    }

    /// Flip repeat; returns the new value
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        debug!(repeat = self.repeat, "Repeat toggled");
        self.publish();
        self.repeat
    }

    // ===== Adapter Events =====

    /// Apply an event reported by the media adapter
    ///
    /// Returns false when the event belongs to a superseded load and was
    /// discarded.
    pub fn handle_event(&mut self, tagged: TaggedEvent) -> bool {
        if tagged.generation != self.generation {
            debug!(
                event_generation = %tagged.generation,
                current_generation = %self.generation,
                event = ?tagged.event,
                "Discarding stale media event"
            );
            return false;
        }

        match tagged.event {
            MediaEvent::MetadataReady { duration } => {
                self.duration =
                    progress::resolve_duration(duration, self.queue.current().duration_hint);
                self.current_time = progress::clamp_position(self.current_time, self.duration);

                if self.autoplay_pending {
                    self.autoplay_pending = false;
                    self.request_play();
                } else if self.status == PlaybackStatus::Loading && !self.play_requested {
                    self.status = PlaybackStatus::Paused;
                }
            }
            MediaEvent::TimeUpdate { current_time } => {
                self.current_time = progress::clamp_position(current_time, self.duration);
            }
            MediaEvent::PlaybackStarted => {
                self.status = PlaybackStatus::Playing;
                self.play_requested = true;
                self.autoplay_pending = false;
            }
            MediaEvent::PlaybackPaused => {
                self.status = PlaybackStatus::Paused;
                self.play_requested = false;
                self.autoplay_pending = false;
            }
            MediaEvent::Stalled => {
                if self.status == PlaybackStatus::Playing {
                    self.status = PlaybackStatus::Loading;
                }
            }
            MediaEvent::Ended => self.handle_ended(),
            MediaEvent::PlayRejected { reason } => {
                warn!(generation = %self.generation, "Playback rejected: {}", reason);
                self.revert_to_paused();
            }
        }

        self.publish();
        true
    }

    // ===== State Queries =====

    /// Current consolidated state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.gain(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            track_index: self.queue.current_index(),
            active_track: self.queue.current().clone(),
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration in seconds (0 = unknown)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume.gain()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Generation of the active load
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the user's last intent was "play"
    pub fn is_play_requested(&self) -> bool {
        self.play_requested
    }

    pub fn current_track(&self) -> &Track {
        self.queue.current()
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// The driven media adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn navigate(&mut self, direction: Direction) {
        let index = self.queue.advance(direction, self.shuffle, &mut self.rng);
        if self.queue.len() == 1 && index == self.queue.current_index() {
            debug!(?direction, "Single-track queue, navigation is a no-op");
            return;
        }

        let autoplay = self.continue_playback && self.play_requested;
        if let Err(e) = self.load_index(index, autoplay) {
            warn!(?direction, "Navigation failed: {}", e);
        }
    }

    /// Move the cursor and load its source under a fresh generation
    fn load_index(&mut self, index: usize, autoplay: bool) -> Result<()> {
        let previous_track_id = self.queue.current().id.clone();
        self.queue.set_current(index)?;

        self.generation = self.generation.next();
        self.current_time = 0.0;
        self.duration = 0.0;
        self.status = PlaybackStatus::Loading;
        self.play_requested = autoplay;
        self.autoplay_pending = autoplay;

        let track = self.queue.current();
        self.adapter.load(&track.audio_url, self.generation);

        info!(
            generation = %self.generation,
            index,
            track_id = %track.id,
            "Loading track"
        );

        self.pending_events.push(ControllerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.publish();
        Ok(())
    }

    fn handle_ended(&mut self) {
        let track_id = self.queue.current().id.clone();
        self.pending_events
            .push(ControllerEvent::TrackFinished { track_id });

        if self.repeat {
            // Same source, same generation: rewind and restart
            self.status = PlaybackStatus::Loading;
            self.current_time = 0.0;
            self.play_requested = true;
            self.adapter.seek(0.0);
            self.request_play();
            return;
        }

        let index = self
            .queue
            .advance(Direction::Next, self.shuffle, &mut self.rng);
        if let Err(e) = self.load_index(index, self.continue_playback) {
            warn!("Advancing after end of track failed: {}", e);
        }
    }

    fn request_play(&mut self) {
        if let Err(e) = self.adapter.play() {
            warn!(generation = %self.generation, "Playback could not start: {}", e);
            self.revert_to_paused();
        }
    }

    fn revert_to_paused(&mut self) {
        self.status = PlaybackStatus::Paused;
        self.play_requested = false;
        self.autoplay_pending = false;
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        if self.last_published.as_ref() == Some(&snapshot) {
            return;
        }

        self.last_published = Some(snapshot.clone());
        self.pending_events.push(ControllerEvent::Snapshot(snapshot));
    }
}

impl<A: MediaAdapter> std::fmt::Debug for PlaybackController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("status", &self.status)
            .field("generation", &self.generation)
            .field("track_index", &self.queue.current_index())
            .field("current_time", &self.current_time)
            .field("duration", &self.duration)
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}
