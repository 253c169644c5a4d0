//! Progress mapping and time formatting
//!
//! Pure numeric policy shared by the controller and presentation code.
//! Ratios are UI-facing values in [0, 1]; times are seconds.

/// Clamp a ratio into [0, 1]
///
/// NaN maps to 0 so a malformed input can never reach the media adapter.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Convert a ratio into an absolute position within `duration`
///
/// Returns 0 when the duration is unknown.
pub fn ratio_to_seconds(ratio: f64, duration: f64) -> f64 {
    if !is_known_duration(duration) {
        return 0.0;
    }
    clamp_unit(ratio) * duration
}

/// Convert an absolute position into a ratio of `duration`
///
/// Returns 0 when the duration is unknown.
pub fn seconds_to_ratio(seconds: f64, duration: f64) -> f64 {
    if !is_known_duration(duration) {
        return 0.0;
    }
    clamp_unit(seconds / duration)
}

/// Clamp a reported position into `[0, duration]`
///
/// The upper bound only applies once the duration is known.
pub fn clamp_position(seconds: f64, duration: f64) -> f64 {
    if !seconds.is_finite() || seconds < 0.0 {
        return 0.0;
    }
    if is_known_duration(duration) {
        seconds.min(duration)
    } else {
        seconds
    }
}

/// Resolve the duration to display
///
/// Precedence: reported duration, then the track's hint, then 0 (unknown).
pub fn resolve_duration(reported: f64, hint: Option<f64>) -> f64 {
    if is_known_duration(reported) {
        return reported;
    }
    match hint {
        Some(hint) if is_known_duration(hint) => hint,
        _ => 0.0,
    }
}

/// Whether `duration` is a usable, positive length
pub fn is_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Render seconds as `M:SS`
///
/// Minutes are not wrapped into hours. Negative and non-finite input renders
/// as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
