//! Tide CLI Library
//!
//! Terminal front end for the Tide playback controller, driven by a simulated
//! media engine.
//!
//! This library exposes the CLI components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod simulated;

// Re-export commonly used types for convenience
pub use commands::{parse_line, Input};
pub use config::{CliConfig, SimulationSettings};
pub use error::{CliError, Result};
pub use simulated::SimulatedMedia;
