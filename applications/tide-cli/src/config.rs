/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tide_playback::{ControllerConfig, Track};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub playback: ControllerConfig,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Timing of the simulated media engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Interval between time updates
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Delay between `load` and metadata
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,

    /// Length used for tracks without a duration hint
    #[serde(default = "default_track_seconds")]
    pub track_seconds: f64,

    /// Playback speed multiplier, handy for watching tracks end
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl CliConfig {
    /// Load configuration from `path` (if it exists) and the environment
    ///
    /// Environment variables use the `TIDE_` prefix and `__` between nested
    /// keys, e.g. `TIDE_PLAYBACK__VOLUME=0.5`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        } else {
            tracing::warn!("Config file {:?} not found, using defaults", path);
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(CliError::Config(
                "At least one [[tracks]] entry is required".to_string(),
            ));
        }

        if self.playback.start_index >= self.tracks.len() {
            return Err(CliError::Config(format!(
                "playback.start_index {} is outside the {} configured tracks",
                self.playback.start_index,
                self.tracks.len()
            )));
        }

        if self.simulation.tick_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_ms must be greater than 0".to_string(),
            ));
        }

        if !(self.simulation.track_seconds.is_finite() && self.simulation.track_seconds > 0.0) {
            return Err(CliError::Config(format!(
                "simulation.track_seconds must be positive, got {}",
                self.simulation.track_seconds
            )));
        }

        for track in &self.tracks {
            if let Some(hint) = track.duration_hint {
                if !(hint.is_finite() && hint > 0.0) {
                    return Err(CliError::Config(format!(
                        "Track {:?} has a non-positive duration_hint {}",
                        track.id, hint
                    )));
                }
            }
        }

        if !(self.simulation.speed.is_finite() && self.simulation.speed > 0.0) {
            return Err(CliError::Config(format!(
                "simulation.speed must be positive, got {}",
                self.simulation.speed
            )));
        }

        Ok(())
    }
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        load_delay_ms: default_load_delay_ms(),
        track_seconds: default_track_seconds(),
        speed: default_speed(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_load_delay_ms() -> u64 {
    300
}

fn default_track_seconds() -> f64 {
    30.0
}

fn default_speed() -> f64 {
    1.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        default_simulation()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            playback: ControllerConfig::default(),
            simulation: default_simulation(),
            tracks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_tracks_and_settings_from_toml() {
        let file = write_config(
            r#"
            [playback]
            volume = 0.4
            continue_playback = true

            [simulation]
            tick_ms = 100

            [[tracks]]
            id = "1"
            title = "Tidal"
            artist = "The Moons"
            audio_url = "https://cdn.example/1.mp3"
            cover_url = "https://cdn.example/1.jpg"
            duration_hint = 184.0
            "#,
        );

        let config = CliConfig::load(file.path()).unwrap();

        assert_eq!(config.playback.volume, 0.4);
        assert!(config.playback.continue_playback);
        assert_eq!(config.simulation.tick_ms, 100);
        assert_eq!(config.simulation.load_delay_ms, 300);
        assert_eq!(
            config.tracks,
            vec![
                Track::new("1", "Tidal", "The Moons", "https://cdn.example/1.mp3")
                    .with_cover_url("https://cdn.example/1.jpg")
                    .with_duration_hint(184.0)
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = CliConfig::load(Path::new("/nonexistent/tide.toml")).unwrap();

        assert!(config.tracks.is_empty());
        assert_eq!(config.playback.volume, 1.0);
        assert_eq!(config.simulation.tick_ms, 250);
    }

    #[test]
    fn validate_rejects_empty_track_list() {
        let config = CliConfig::default();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_start_index_outside_tracks() {
        let mut config = CliConfig::default();
        config.tracks.push(Track::new("a", "A", "Artist", "a.mp3"));
        config.playback.start_index = 1;

        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_zero_length_tracks() {
        let mut config = CliConfig::default();
        config.tracks.push(Track::new("a", "A", "Artist", "a.mp3"));
        config.simulation.track_seconds = 0.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        config.simulation.track_seconds = 30.0;
        config.tracks[0].duration_hint = Some(-4.0);
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        config.tracks[0].duration_hint = Some(4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_tick() {
        let mut config = CliConfig::default();
        config.tracks.push(Track::new("a", "A", "Artist", "a.mp3"));
        config.simulation.tick_ms = 0;

        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
