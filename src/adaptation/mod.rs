//! Difficulty ladder adaptation.
//!
//! Compares the score a learner actually achieved at the current level with
//! the score the Rasch model predicted for them, and nudges the target
//! difficulty when the gap is large. The nudge is conservative during the
//! first few questions of a session and more responsive afterwards.

use tracing::debug;

use crate::config::AdapterParams;
use crate::prediction;
use crate::sanitize;
use crate::scale;
use crate::types::{DifficultyAdjustment, DifficultyLevel, DIFFICULTY_MAX, DIFFICULTY_MIN};

/// Compute the next target difficulty level.
///
/// `actual_score` is the learner's recent score (0..100) at the current
/// level; `questions_answered` counts questions in this session.
pub fn adapt_difficulty(
    current: DifficultyLevel,
    theta: f64,
    actual_score: f64,
    questions_answered: usize,
    params: &AdapterParams,
) -> DifficultyAdjustment {
    let actual = sanitize::clamp_score(actual_score);
    let b_current = scale::to_numeric(current);
    let predicted = prediction::predict_at_numeric(theta, b_current);
    let performance_gap = actual - predicted.predicted_score;

    let factor = if questions_answered < params.early_session_threshold {
        params.early_factor
    } else {
        params.late_factor
    };

    let adjustment = if performance_gap > params.gap_threshold {
        factor * (performance_gap / 100.0).min(params.max_gap_contribution)
    } else if performance_gap < -params.gap_threshold {
        -factor * (performance_gap.abs() / 100.0).min(params.max_gap_contribution)
    } else {
        0.0
    };

    let optimal = (theta + adjustment).clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);
    let new_level = scale::from_numeric(optimal);
    let justification = justify(performance_gap, params.gap_threshold, current, new_level);

    debug!(
        current = current.as_str(),
        new = new_level.as_str(),
        performance_gap,
        adjustment,
        "difficulty adaptation"
    );

    DifficultyAdjustment {
        current_level: current,
        new_level,
        performance_gap,
        justification,
    }
}

fn justify(
    gap: f64,
    threshold: f64,
    current: DifficultyLevel,
    new_level: DifficultyLevel,
) -> String {
    if gap > threshold {
        if new_level > current {
            format!(
                "excellent performance, raising difficulty to {}",
                new_level.as_str()
            )
        } else {
            "excellent performance, already at the matching level".to_string()
        }
    } else if gap < -threshold {
        if new_level < current {
            format!(
                "performance below expectation, lowering difficulty to {}",
                new_level.as_str()
            )
        } else {
            "performance below expectation, already at the matching level".to_string()
        }
    } else {
        "performance in line with prediction, keeping the current level".to_string()
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_overperformance_raises_level() {
        let params = AdapterParams::default();
        // theta 1.2 at Medium predicts ~77; a perfect score overshoots it
        let result = adapt_difficulty(DifficultyLevel::Medium, 1.2, 100.0, 10, &params);
        assert!(result.performance_gap > params.gap_threshold);
        assert!(result.new_level > DifficultyLevel::Medium);
    }

    #[test]
    fn test_underperformance_lowers_level() {
        let params = AdapterParams::default();
        // theta -0.8 at Medium predicts ~31; a score of 5 undershoots by ~26
        let result = adapt_difficulty(DifficultyLevel::Medium, -0.8, 5.0, 10, &params);
        assert!(result.performance_gap < -params.gap_threshold);
        assert!(result.new_level < DifficultyLevel::Medium);
    }

    #[test]
    fn test_matching_performance_follows_theta() {
        let params = AdapterParams::default();
        // predicted ~50 at Medium for theta 0; actual 55 is within the band
        let result = adapt_difficulty(DifficultyLevel::Medium, 0.0, 55.0, 10, &params);
        assert!(result.performance_gap.abs() <= params.gap_threshold);
        assert_eq!(result.new_level, DifficultyLevel::Medium);
    }

    #[test]
    fn test_early_session_adjusts_less() {
        let params = AdapterParams::default();
        let early = adapt_difficulty(DifficultyLevel::Medium, 0.3, 100.0, 3, &params);
        let late = adapt_difficulty(DifficultyLevel::Medium, 0.3, 100.0, 10, &params);
        // same gap, but only the late-session nudge reaches the next level
        assert!(late.new_level > early.new_level);
    }

    #[test]
    fn test_never_exceeds_ladder_bounds() {
        let params = AdapterParams::default();
        let top = adapt_difficulty(DifficultyLevel::VeryHard, 3.0, 100.0, 20, &params);
        assert_eq!(top.new_level, DifficultyLevel::VeryHard);

        let bottom = adapt_difficulty(DifficultyLevel::VeryEasy, -3.0, 0.0, 20, &params);
        assert_eq!(bottom.new_level, DifficultyLevel::VeryEasy);
    }

    #[test]
    fn test_score_is_sanitized() {
        let params = AdapterParams::default();
        let result = adapt_difficulty(DifficultyLevel::Medium, 0.0, f64::NAN, 10, &params);
        // NaN score degrades to 0, which reads as underperformance
        assert!(result.performance_gap < 0.0);
    }

    #[test]
    fn test_justification_mentions_direction() {
        let params = AdapterParams::default();
        let up = adapt_difficulty(DifficultyLevel::Medium, 1.2, 100.0, 10, &params);
        assert!(up.justification.contains("raising"));

        let down = adapt_difficulty(DifficultyLevel::Medium, -0.8, 5.0, 10, &params);
        assert!(down.justification.contains("lowering"));
    }
}
