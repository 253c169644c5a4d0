//! Output gain
//!
//! Gain is linear in [0, 1]; the media adapter applies it as-is.

use crate::progress::clamp_unit;

/// Clamped linear output gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    gain: f64,
}

impl Volume {
    /// Create a volume, clamping `gain` into [0, 1]
    pub fn new(gain: f64) -> Self {
        Self {
            gain: clamp_unit(gain),
        }
    }

    /// Set gain, clamping into [0, 1]
    ///
    /// Returns the effective gain.
    pub fn set(&mut self, gain: f64) -> f64 {
        self.gain = clamp_unit(gain);
        self.gain
    }

    /// Effective gain
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
