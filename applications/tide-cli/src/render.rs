/// Snapshot rendering for the terminal
use tide_playback::{format_duration, PlaybackSnapshot, PlaybackStatus};

/// Width of the text progress bar
const BAR_WIDTH: usize = 20;

/// Render a snapshot as a single status line
///
/// ```text
/// [playing] 1:05 / 3:04 [#######-------------] Tidal - The Moons  vol 80%  shuffle
/// ```
pub fn render_line(snapshot: &PlaybackSnapshot) -> String {
    let status = match snapshot.status {
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Loading => "loading",
        PlaybackStatus::Playing => "playing",
    };

    let mut line = format!(
        "[{}] {} / {} [{}] {} - {}  vol {}%",
        status,
        format_duration(snapshot.current_time),
        format_duration(snapshot.duration),
        progress_bar(snapshot.progress()),
        snapshot.active_track.title,
        snapshot.active_track.artist,
        (snapshot.volume * 100.0).round() as u32,
    );

    if snapshot.shuffle {
        line.push_str("  shuffle");
    }
    if snapshot.repeat {
        line.push_str("  repeat");
    }

    line
}

/// Render a snapshot as one line of JSON
pub fn render_json(snapshot: &PlaybackSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

fn progress_bar(ratio: f64) -> String {
    let filled = ((ratio * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tide_playback::Track;

    fn snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: PlaybackStatus::Playing,
            current_time: 65.0,
            duration: 130.0,
            volume: 0.8,
            shuffle: true,
            repeat: false,
            track_index: 0,
            active_track: Track::new("1", "Tidal", "The Moons", "https://cdn.example/1.mp3"),
        }
    }

    #[test]
    fn renders_status_line() {
        assert_eq!(
            render_line(&snapshot()),
            "[playing] 1:05 / 2:10 [##########----------] Tidal - The Moons  vol 80%  shuffle"
        );
    }

    #[test]
    fn unknown_duration_renders_empty_bar() {
        let mut snapshot = snapshot();
        snapshot.status = PlaybackStatus::Loading;
        snapshot.duration = 0.0;
        snapshot.shuffle = false;
        snapshot.repeat = true;

        let line = render_line(&snapshot);
        assert!(line.starts_with("[loading] 1:05 / 0:00 [--------------------]"));
        assert!(line.ends_with("repeat"));
    }

    #[test]
    fn renders_json() {
        let json = render_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "playing");
        assert_eq!(value["current_time"], 65.0);
        assert!(!json.contains('\n'));
    }
}
