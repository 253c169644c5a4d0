//! Shared test infrastructure for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use tide_playback::{
    ControllerConfig, Generation, MediaAdapter, MediaEvent, PlaybackController, PlaybackError,
    Result, TaggedEvent, Track,
};

/// Adapter call, as observed by the recording adapter
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    Load { source: String, generation: Generation },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
}

#[derive(Debug, Default)]
pub struct AdapterLog {
    pub calls: Vec<AdapterCall>,
    pub reject_play: bool,
}

impl AdapterLog {
    pub fn loads(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, AdapterCall::Load { .. }))
            .count()
    }
}

/// Media adapter double that records every call
///
/// The log is shared so a test can inspect it and flip `reject_play` while
/// the controller owns the adapter.
#[derive(Debug, Clone, Default)]
pub struct RecordingAdapter {
    log: Rc<RefCell<AdapterLog>>,
}

impl RecordingAdapter {
    pub fn new() -> (Self, Rc<RefCell<AdapterLog>>) {
        let adapter = Self::default();
        let log = Rc::clone(&adapter.log);
        (adapter, log)
    }
}

impl MediaAdapter for RecordingAdapter {
    fn load(&mut self, source: &str, generation: Generation) {
        self.log.borrow_mut().calls.push(AdapterCall::Load {
            source: source.to_string(),
            generation,
        });
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.calls.push(AdapterCall::Play);
        if log.reject_play {
            Err(PlaybackError::PlaybackStart("blocked by autoplay policy".to_string()))
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.log.borrow_mut().calls.push(AdapterCall::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.log.borrow_mut().calls.push(AdapterCall::Seek(position));
    }

    fn set_volume(&mut self, gain: f64) {
        self.log.borrow_mut().calls.push(AdapterCall::SetVolume(gain));
    }
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(
        id,
        format!("Track {}", id),
        "Test Artist",
        format!("https://cdn.example/{}.mp3", id),
    )
}

pub fn create_controller(
    ids: &[&str],
) -> (PlaybackController<RecordingAdapter>, Rc<RefCell<AdapterLog>>) {
    create_controller_with(ids, ControllerConfig::default())
}

pub fn create_controller_with(
    ids: &[&str],
    config: ControllerConfig,
) -> (PlaybackController<RecordingAdapter>, Rc<RefCell<AdapterLog>>) {
    let tracks = ids.iter().map(|id| create_test_track(id)).collect();
    let (adapter, log) = RecordingAdapter::new();
    let controller = PlaybackController::new(tracks, adapter, config).unwrap();
    (controller, log)
}

/// Deliver an event tagged with the controller's current generation
pub fn deliver(controller: &mut PlaybackController<RecordingAdapter>, event: MediaEvent) -> bool {
    let generation = controller.generation();
    controller.handle_event(TaggedEvent::new(generation, event))
}
