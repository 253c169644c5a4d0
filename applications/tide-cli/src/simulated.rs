//! Simulated media engine
//!
//! Stands in for a real audio element: loads take `load_delay_ms` to report
//! metadata, a playing source advances in real time (scaled by `speed`) and
//! reports time updates every tick, and a source that reaches its duration
//! reports `Ended`.
//!
//! The engine runs on its own thread. [`SimulatedMedia`] is the adapter half
//! that the controller drives; it only forwards calls to that thread.

use crate::config::SimulationSettings;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::collections::HashMap;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tide_playback::{
    AdapterEventSender, Generation, MediaAdapter, MediaEvent, PlaybackError, Result, Track,
};
use tracing::{debug, trace};

/// Calls forwarded to the engine thread
#[derive(Debug, Clone, PartialEq)]
enum Control {
    Load { source: String, generation: Generation },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    Shutdown,
}

/// Adapter backed by a simulated engine thread
pub struct SimulatedMedia {
    control_tx: Sender<Control>,
    handle: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    /// Start the engine thread
    ///
    /// `tracks` supplies per-source durations from their hints.
    pub fn spawn(
        events: AdapterEventSender,
        settings: SimulationSettings,
        tracks: &[Track],
    ) -> Result<Self> {
        let durations = tracks
            .iter()
            .filter_map(|track| Some((track.audio_url.clone(), track.duration_hint?)))
            .collect();
        let (control_tx, control_rx) = unbounded();
        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let engine = EngineState::new(settings, durations);

        let handle = thread::Builder::new()
            .name("tide-sim-media".to_string())
            .spawn(move || run_engine(engine, &control_rx, &events, tick))?;

        Ok(Self {
            control_tx,
            handle: Some(handle),
        })
    }

    fn send(&self, control: Control) -> Result<()> {
        self.control_tx
            .send(control)
            .map_err(|_| PlaybackError::Adapter("simulated engine stopped".to_string()))
    }
}

impl MediaAdapter for SimulatedMedia {
    fn load(&mut self, source: &str, generation: Generation) {
        self.send(Control::Load {
            source: source.to_string(),
            generation,
        })
        .ok();
    }

    fn play(&mut self) -> Result<()> {
        self.send(Control::Play)
    }

    fn pause(&mut self) {
        self.send(Control::Pause).ok();
    }

    fn seek(&mut self, position: f64) {
        self.send(Control::Seek(position)).ok();
    }

    fn set_volume(&mut self, gain: f64) {
        self.send(Control::SetVolume(gain)).ok();
    }
}

impl Drop for SimulatedMedia {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.control_tx.send(Control::Shutdown).ok();
            handle.join().ok();
        }
    }
}

fn run_engine(
    mut engine: EngineState,
    control_rx: &Receiver<Control>,
    events: &AdapterEventSender,
    tick: Duration,
) {
    let mut next_tick = Instant::now() + tick;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        let emitted = match control_rx.recv_timeout(timeout) {
            Ok(Control::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(control) => engine.apply(control, Instant::now()),
            Err(RecvTimeoutError::Timeout) => {
                next_tick += tick;
                engine.tick(Instant::now())
            }
        };

        for event in emitted {
            trace!(generation = %engine.generation, ?event, "Simulated event");
            if events.emit(engine.generation, event).is_err() {
                debug!("Event receiver closed, stopping simulated engine");
                return;
            }
        }
    }

    debug!("Simulated engine stopped");
}

/// Engine model, advanced by controls and clock ticks
#[derive(Debug)]
struct EngineState {
    settings: SimulationSettings,
    durations: HashMap<String, f64>,

    generation: Generation,
    duration: f64,
    position: f64,

    /// Metadata is reported once this instant passes
    ready_at: Option<Instant>,
    /// `play` arrived before metadata
    play_pending: bool,
    /// Playing since the given instant, at `position`
    playing_since: Option<Instant>,
}

impl EngineState {
    fn new(settings: SimulationSettings, durations: HashMap<String, f64>) -> Self {
        Self {
            settings,
            durations,
            generation: Generation::default(),
            duration: 0.0,
            position: 0.0,
            ready_at: None,
            play_pending: false,
            playing_since: None,
        }
    }

    fn apply(&mut self, control: Control, now: Instant) -> Vec<MediaEvent> {
        match control {
            Control::Load { source, generation } => {
                self.generation = generation;
                self.duration = self
                    .durations
                    .get(&source)
                    .copied()
                    .unwrap_or(self.settings.track_seconds);
                self.position = 0.0;
                self.play_pending = false;
                self.playing_since = None;
                self.ready_at = Some(now + Duration::from_millis(self.settings.load_delay_ms));
                debug!(%generation, %source, "Simulated load");
                Vec::new()
            }
            Control::Play => {
                if self.ready_at.is_some() {
                    self.play_pending = true;
                    Vec::new()
                } else {
                    self.start(now)
                }
            }
            Control::Pause => {
                self.play_pending = false;
                if self.playing_since.is_some() {
                    self.position = self.position_at(now);
                    self.playing_since = None;
                    vec![MediaEvent::PlaybackPaused]
                } else {
                    Vec::new()
                }
            }
            Control::Seek(position) => {
                self.position = position.clamp(0.0, self.duration.max(0.0));
                if self.playing_since.is_some() {
                    self.playing_since = Some(now);
                }
                vec![MediaEvent::TimeUpdate {
                    current_time: self.position,
                }]
            }
            Control::SetVolume(gain) => {
                trace!(gain, "Simulated volume");
                Vec::new()
            }
            Control::Shutdown => Vec::new(),
        }
    }

    fn tick(&mut self, now: Instant) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        if let Some(ready_at) = self.ready_at {
            if now < ready_at {
                return events;
            }
            self.ready_at = None;
            events.push(MediaEvent::MetadataReady {
                duration: self.duration,
            });
            if self.play_pending {
                events.extend(self.start(now));
            }
            return events;
        }

        if self.playing_since.is_some() {
            let position = self.position_at(now);
            if position >= self.duration {
                self.position = self.duration;
                self.playing_since = None;
                events.push(MediaEvent::TimeUpdate {
                    current_time: self.duration,
                });
                events.push(MediaEvent::Ended);
            } else {
                events.push(MediaEvent::TimeUpdate {
                    current_time: position,
                });
            }
        }

        events
    }

    fn start(&mut self, now: Instant) -> Vec<MediaEvent> {
        self.play_pending = false;
        if self.duration <= 0.0 {
            return vec![MediaEvent::PlayRejected {
                reason: "source has no playable length".to_string(),
            }];
        }
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.playing_since = Some(now);
        vec![MediaEvent::PlaybackStarted]
    }

    fn position_at(&self, now: Instant) -> f64 {
        match self.playing_since {
            Some(since) => {
                let elapsed = now.saturating_duration_since(since).as_secs_f64();
                (self.position + elapsed * self.settings.speed).min(self.duration)
            }
            None => self.position,
        }
    }
}
