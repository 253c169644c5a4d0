//! Property-based tests for the playback controller
//!
//! Uses proptest to verify navigation, seek and volume invariants across
//! random queues and inputs.

mod common;

use common::{create_test_track, deliver, RecordingAdapter};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tide_playback::{
    format_duration, progress, ControllerConfig, Direction, MediaEvent, PlaybackController,
    PlaybackStatus, Queue, Track,
};

// ===== Helpers =====

fn tracks(len: usize) -> Vec<Track> {
    (0..len)
        .map(|i| create_test_track(&format!("t{}", i)))
        .collect()
}

fn controller_with(len: usize, seed: u64) -> PlaybackController<RecordingAdapter> {
    let config = ControllerConfig {
        shuffle_seed: Some(seed),
        ..ControllerConfig::default()
    };
    let (adapter, _log) = RecordingAdapter::new();
    PlaybackController::new(tracks(len), adapter, config).unwrap()
}

// ===== Property Tests =====

proptest! {
    /// Property: Sequential next from any index cycles back after `len` steps
    #[test]
    fn sequential_next_cycles_through_queue(len in 1usize..40, start in 0usize..40) {
        let start = start % len;
        let mut queue = Queue::new(tracks(len)).unwrap();
        queue.set_current(start).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let mut visited = vec![false; len];
        for _ in 0..len {
            let index = queue.advance(Direction::Next, false, &mut rng);
            visited[index] = true;
            queue.set_current(index).unwrap();
        }

        prop_assert_eq!(queue.current_index(), start);
        prop_assert!(visited.iter().all(|v| *v), "Sequential walk skipped a track");
    }

    /// Property: Previous undoes next when shuffle is off
    #[test]
    fn previous_inverts_next(len in 1usize..40, start in 0usize..40) {
        let start = start % len;
        let mut queue = Queue::new(tracks(len)).unwrap();
        queue.set_current(start).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let next = queue.advance(Direction::Next, false, &mut rng);
        queue.set_current(next).unwrap();
        let back = queue.advance(Direction::Previous, false, &mut rng);

        prop_assert_eq!(back, start);
    }

    /// Property: Shuffle never picks the current track when there is a choice
    #[test]
    fn shuffle_never_repeats_current(len in 2usize..30, seed in any::<u64>(), steps in 1usize..30) {
        let mut controller = controller_with(len, seed);
        controller.toggle_shuffle();

        for step in 0..steps {
            let before = controller.queue().current_index();
            if step % 2 == 0 {
                controller.next();
            } else {
                controller.previous();
            }
            let after = controller.queue().current_index();
            prop_assert_ne!(after, before);
            prop_assert!(after < len);
        }
    }

    /// Property: Every navigation starts a strictly newer generation
    #[test]
    fn navigation_advances_generation(len in 2usize..20, seed in any::<u64>(), shuffle in any::<bool>()) {
        let mut controller = controller_with(len, seed);
        if shuffle {
            controller.toggle_shuffle();
        }

        let before = controller.generation();
        controller.next();
        prop_assert!(controller.generation() > before);
        prop_assert_eq!(controller.status(), PlaybackStatus::Loading);
    }

    /// Property: Seek always lands inside [0, duration]
    #[test]
    fn seek_stays_in_bounds(duration in 1.0f64..10_000.0, ratio in -5.0f64..5.0) {
        let mut controller = controller_with(1, 0);
        deliver(&mut controller, MediaEvent::MetadataReady { duration });

        controller.seek_to(ratio);

        let position = controller.current_time();
        prop_assert!(position >= 0.0);
        prop_assert!(position <= duration);
    }

    /// Property: Reported positions are clamped to the known duration
    #[test]
    fn time_updates_stay_in_bounds(duration in 1.0f64..10_000.0, reported in -100.0f64..20_000.0) {
        let mut controller = controller_with(1, 0);
        deliver(&mut controller, MediaEvent::MetadataReady { duration });
        deliver(&mut controller, MediaEvent::TimeUpdate { current_time: reported });

        let position = controller.current_time();
        prop_assert!((0.0..=duration).contains(&position));
    }

    /// Property: Volume is always clamped into [0, 1]
    #[test]
    fn volume_always_clamped(gain in -10.0f64..10.0) {
        let mut controller = controller_with(1, 0);
        let effective = controller.set_volume(gain);

        prop_assert!((0.0..=1.0).contains(&effective));
        prop_assert_eq!(controller.volume(), effective);
        if (0.0..=1.0).contains(&gain) {
            prop_assert_eq!(effective, gain);
        }
    }

    /// Property: Ratio mapping round-trips within the track
    #[test]
    fn ratio_mapping_is_consistent(duration in 1.0f64..10_000.0, ratio in 0.0f64..=1.0) {
        let seconds = progress::ratio_to_seconds(ratio, duration);
        let back = progress::seconds_to_ratio(seconds, duration);
        prop_assert!((back - ratio).abs() < 1e-9);
    }

    /// Property: Formatting never panics and always renders M:SS
    #[test]
    fn format_duration_is_well_formed(seconds in any::<f64>()) {
        let formatted = format_duration(seconds);
        let (minutes, secs) = formatted.split_once(':').unwrap();

        prop_assert!(!minutes.is_empty());
        prop_assert!(minutes.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u64>().unwrap() < 60);
    }
}

#[test]
fn shuffle_with_single_track_stays_put() {
    let mut controller = controller_with(1, 7);
    controller.toggle_shuffle();

    for _ in 0..10 {
        controller.next();
        assert_eq!(controller.queue().current_index(), 0);
    }
}
