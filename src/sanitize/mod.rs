//! Numeric hygiene helpers shared across the estimation modules.

/// Check whether a slice contains NaN or infinite values.
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Replace a non-finite value with a fallback.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamp into [0, 1]; non-finite values map to 0.
pub fn clamp_unit(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}

/// Clamp a score into [0, 100]; non-finite values map to 0.
pub fn clamp_score(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, 100.0)
}

/// Response time usable for window statistics: finite and non-negative.
pub fn usable_response_time(secs: f64) -> f64 {
    finite_or(secs, 0.0).max(0.0)
}
