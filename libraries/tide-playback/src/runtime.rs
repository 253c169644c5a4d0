//! Player runtime
//!
//! Runs a [`PlaybackController`] on a dedicated thread. User commands and
//! adapter events arrive on two channels and are applied strictly one at a
//! time, so the controller never sees concurrent transitions. Every event the
//! controller queues is forwarded to the runtime's event channel.

use crate::{
    adapter::{AdapterEventSender, MediaAdapter, TaggedEvent},
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::ControllerEvent,
    types::{ControllerConfig, Track},
};
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Capacity of the command channel
const COMMAND_CAPACITY: usize = 32;

/// Commands sent to the playback thread
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Play or pause
    TogglePlay,

    /// Skip to next track
    Next,

    /// Go to previous track
    Previous,

    /// Flip shuffle mode
    ToggleShuffle,

    /// Flip repeat mode
    ToggleRepeat,

    /// Seek to a ratio of the duration (0.0-1.0)
    SeekTo(f64),

    /// Set volume (0.0-1.0)
    SetVolume(f64),

    /// Load the track at a queue index
    SelectTrack(usize),

    /// Stop the playback thread
    Shutdown,
}

/// Handle to a controller running on its own thread
pub struct PlayerRuntime {
    /// Command sender
    command_tx: Sender<PlayerCommand>,

    /// Event receiver
    event_rx: Receiver<ControllerEvent>,

    /// Playback thread
    handle: Option<JoinHandle<()>>,
}

impl PlayerRuntime {
    /// Start the playback thread
    ///
    /// `make_adapter` runs on the playback thread and receives the sender the
    /// adapter uses to report its events.
    ///
    /// # Returns
    /// * `Ok(runtime)` - Controller constructed and running
    /// * `Err(_)` - Adapter or controller construction failed (empty queue,
    ///   bad start index)
    pub fn spawn<A, F>(tracks: Vec<Track>, config: ControllerConfig, make_adapter: F) -> Result<Self>
    where
        A: MediaAdapter + 'static,
        F: FnOnce(AdapterEventSender) -> Result<A> + Send + 'static,
    {
        let (command_tx, command_rx) = bounded(COMMAND_CAPACITY);
        let (media_tx, media_rx) = unbounded::<TaggedEvent>();
        let (event_tx, event_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded::<Result<()>>(1);

        let handle = thread::Builder::new()
            .name("tide-playback".to_string())
            .spawn(move || {
                let adapter = match make_adapter(AdapterEventSender::new(media_tx.clone())) {
                    Ok(adapter) => adapter,
                    Err(e) => {
                        ready_tx.send(Err(e)).ok();
                        return;
                    }
                };

                let controller = match PlaybackController::new(tracks, adapter, config) {
                    Ok(controller) => {
                        ready_tx.send(Ok(())).ok();
                        controller
                    }
                    Err(e) => {
                        ready_tx.send(Err(e)).ok();
                        return;
                    }
                };

                // Keep our own sender alive so the event channel never disconnects
                let _media_tx = media_tx;
                run_loop(controller, &command_rx, &media_rx, &event_tx);
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                command_tx,
                event_rx,
                handle: Some(handle),
            }),
            Ok(Err(e)) => {
                handle.join().ok();
                Err(e)
            }
            Err(_) => {
                handle.join().ok();
                Err(PlaybackError::RuntimeClosed)
            }
        }
    }

    /// Queue a command for the playback thread
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::RuntimeClosed)
    }

    /// Events forwarded from the controller, oldest first
    pub fn events(&self) -> &Receiver<ControllerEvent> {
        &self.event_rx
    }

    /// Stop the playback thread and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.command_tx.send(PlayerCommand::Shutdown).ok();
        if handle.join().is_err() {
            warn!("Playback thread panicked");
        }
    }
}

impl Drop for PlayerRuntime {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop<A: MediaAdapter>(
    mut controller: PlaybackController<A>,
    command_rx: &Receiver<PlayerCommand>,
    media_rx: &Receiver<TaggedEvent>,
    event_tx: &Sender<ControllerEvent>,
) {
    forward_events(&mut controller, event_tx);

    loop {
        select! {
            recv(command_rx) -> command => match command {
                Ok(PlayerCommand::Shutdown) | Err(_) => break,
                Ok(command) => apply_command(&mut controller, command),
            },
            recv(media_rx) -> event => {
                if let Ok(event) = event {
                    controller.handle_event(event);
                }
            },
        }

        forward_events(&mut controller, event_tx);
    }

    debug!("Playback thread stopped");
}

fn apply_command<A: MediaAdapter>(controller: &mut PlaybackController<A>, command: PlayerCommand) {
    debug!(?command, "Applying command");

    match command {
        PlayerCommand::TogglePlay => controller.toggle_play(),
        PlayerCommand::Next => controller.next(),
        PlayerCommand::Previous => controller.previous(),
        PlayerCommand::ToggleShuffle => {
            controller.toggle_shuffle();
        }
        PlayerCommand::ToggleRepeat => {
            controller.toggle_repeat();
        }
        PlayerCommand::SeekTo(ratio) => controller.seek_to(ratio),
        PlayerCommand::SetVolume(gain) => {
            controller.set_volume(gain);
        }
        PlayerCommand::SelectTrack(index) => {
            if let Err(e) = controller.select_track(index) {
                warn!(index, "Track selection failed: {}", e);
            }
        }
        PlayerCommand::Shutdown => {}
    }
}

fn forward_events<A: MediaAdapter>(
    controller: &mut PlaybackController<A>,
    event_tx: &Sender<ControllerEvent>,
) {
    for event in controller.drain_events() {
        // Receiver may already be gone during shutdown
        event_tx.send(event).ok();
    }
}
