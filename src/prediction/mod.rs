//! Performance prediction under the Rasch model.
//!
//! Probability of a correct response: P = 1 / (1 + exp(-(theta - b))).
//! Predictions are most reliable when ability and difficulty are well
//! matched, which is what the confidence label reflects.
//!
//! `predict_with_item` is the three-parameter extension using the item
//! bank's discrimination and guessing metadata:
//! P = c + (1 - c) / (1 + exp(-a * (theta - b))).

use crate::sanitize;
use crate::scale;
use crate::types::{ConfidenceLevel, DifficultyDelta, DifficultyLevel, ItemParameters};

/// Minimum usable discrimination; anything below is treated as flat noise
const MIN_DISCRIMINATION: f64 = 1e-3;

/// Rasch probability of a correct response given ability and difficulty.
pub fn probability_correct(theta: f64, difficulty: f64) -> f64 {
    let z = theta - difficulty;
    sanitize::clamp_unit(1.0 / (1.0 + (-z).exp()))
}

/// 3PL probability using item discrimination and guessing.
pub fn probability_correct_3pl(theta: f64, item: &ItemParameters) -> f64 {
    let a = sanitize::finite_or(item.discrimination, 1.0).max(MIN_DISCRIMINATION);
    let c = sanitize::clamp_unit(item.guessing).min(1.0 - f64::EPSILON);
    let b = scale::to_numeric(item.difficulty);
    let z = a * (theta - b);
    sanitize::clamp_unit(c + (1.0 - c) / (1.0 + (-z).exp()))
}

/// Predict the outcome for a learner at `theta` on an item of the given
/// categorical difficulty.
pub fn predict_performance(theta: f64, level: DifficultyLevel) -> crate::types::PredictionResult {
    predict_at_numeric(theta, scale::to_numeric(level))
}

/// Predict at a raw numeric difficulty. Shared by the adapter, which works
/// on the numeric scale directly.
pub fn predict_at_numeric(theta: f64, difficulty: f64) -> crate::types::PredictionResult {
    let probability = probability_correct(theta, difficulty);
    build_result(theta, difficulty, probability)
}

/// Predict using the item's full 3PL metadata.
pub fn predict_with_item(theta: f64, item: &ItemParameters) -> crate::types::PredictionResult {
    let b = scale::to_numeric(item.difficulty);
    let probability = probability_correct_3pl(theta, item);
    build_result(theta, b, probability)
}

fn build_result(theta: f64, difficulty: f64, probability: f64) -> crate::types::PredictionResult {
    let score = 100.0 * probability;
    crate::types::PredictionResult {
        predicted_score: score,
        probability_correct: probability,
        confidence: confidence_for_gap((theta - difficulty).abs()),
        recommended_delta: delta_for_score(score),
    }
}

fn confidence_for_gap(gap: f64) -> ConfidenceLevel {
    if gap < 0.5 {
        ConfidenceLevel::High
    } else if gap < 1.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

fn delta_for_score(score: f64) -> DifficultyDelta {
    if score > 90.0 {
        DifficultyDelta::Increase
    } else if score > 80.0 {
        DifficultyDelta::SlightIncrease
    } else if score > 60.0 {
        DifficultyDelta::Maintain
    } else if score >= 40.0 {
        DifficultyDelta::SlightDecrease
    } else {
        DifficultyDelta::Decrease
    }
}
