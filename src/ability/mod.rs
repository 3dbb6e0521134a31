//! Maximum-likelihood ability estimation under the Rasch model.
//!
//! Core theory:
//! - Probability of a correct response: P = 1 / (1 + exp(-(theta - b)))
//! - The estimator maximizes the recency-weighted log-likelihood of the
//!   observed correctness sequence over theta in [-3, 3]
//! - Uncertainty comes from Fisher information: I = sum w_i * p_i * (1 - p_i)
//!   evaluated at the estimated theta, standard_error = 1 / sqrt(I)
//!
//! The weighted log-likelihood is concave in theta, so its derivative (the
//! score function) is strictly decreasing and a bounded bisection converges.
//! Estimation never fails toward the caller: an empty history or a numerical
//! irregularity degrades to a neutral estimate (theta 0, maximal
//! uncertainty) so a live test flow is never aborted.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::warn;

use crate::config::EstimatorParams;
use crate::prediction::probability_correct;
use crate::scale;
use crate::types::{
    AbilityEstimate, ResponseRecord, CI_Z, MAX_STANDARD_ERROR, THETA_MAX, THETA_MIN,
};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One response reduced to what the likelihood needs.
#[derive(Debug, Clone, Copy)]
struct Observation {
    difficulty: f64,
    is_correct: bool,
    weight: f64,
}

pub struct AbilityEstimator {
    params: EstimatorParams,
}

impl AbilityEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    /// Estimate a learner's ability from their response history.
    ///
    /// `now` anchors the recency weighting; passing it explicitly keeps the
    /// computation deterministic and testable.
    pub fn estimate(
        &self,
        learner_id: &str,
        history: &[ResponseRecord],
        now: DateTime<Utc>,
    ) -> AbilityEstimate {
        let observations = self.observations(history, now);
        if observations.is_empty() {
            return neutral_estimate(learner_id, 0, now);
        }

        let theta = match self.solve_theta(&observations) {
            Some(theta) => theta,
            None => {
                warn!(
                    learner_id,
                    responses = observations.len(),
                    "ability optimization degenerated, falling back to neutral estimate"
                );
                return neutral_estimate(learner_id, observations.len(), now);
            }
        };

        let standard_error = self.standard_error(theta, &observations);
        AbilityEstimate {
            learner_id: learner_id.to_string(),
            theta,
            standard_error,
            confidence_interval: (theta - CI_Z * standard_error, theta + CI_Z * standard_error),
            sample_size: observations.len(),
            computed_at: now,
        }
    }

    /// Estimate many learners in parallel. Results keep the input order.
    pub fn estimate_batch(
        &self,
        cohort: &[(&str, &[ResponseRecord])],
        now: DateTime<Utc>,
    ) -> Vec<AbilityEstimate> {
        cohort
            .par_iter()
            .map(|(learner_id, history)| self.estimate(learner_id, history, now))
            .collect()
    }

    /// Weight of a response that is `elapsed_days` old: exponential decay
    /// with the configured half-life, floored so stale history never
    /// vanishes entirely. Future-dated responses weigh 1.0.
    pub fn recency_weight(&self, elapsed_days: f64) -> f64 {
        if !elapsed_days.is_finite() || elapsed_days <= 0.0 {
            return 1.0;
        }
        let half_life = self.params.half_life_days.max(f64::EPSILON);
        (-std::f64::consts::LN_2 * elapsed_days / half_life)
            .exp()
            .max(self.params.weight_floor)
    }

    fn observations(&self, history: &[ResponseRecord], now: DateTime<Utc>) -> Vec<Observation> {
        history
            .iter()
            .filter_map(|record| {
                let elapsed_days =
                    (now - record.timestamp).num_seconds() as f64 / SECONDS_PER_DAY;
                let weight = self.recency_weight(elapsed_days);
                if !weight.is_finite() || weight <= 0.0 {
                    return None;
                }
                Some(Observation {
                    difficulty: scale::to_numeric(record.difficulty),
                    is_correct: record.is_correct,
                    weight,
                })
            })
            .collect()
    }

    /// Bisection on the score function over [-3, 3] with a hard iteration
    /// cap. When the derivative never changes sign the maximum sits on a
    /// boundary. Returns None only on non-finite intermediates.
    fn solve_theta(&self, observations: &[Observation]) -> Option<f64> {
        let mut low = THETA_MIN;
        let mut high = THETA_MAX;

        let d_low = score_function(low, observations);
        let d_high = score_function(high, observations);
        if !d_low.is_finite() || !d_high.is_finite() {
            return None;
        }
        if d_low <= 0.0 {
            return Some(low);
        }
        if d_high >= 0.0 {
            return Some(high);
        }

        for _ in 0..self.params.max_iterations {
            let mid = (low + high) / 2.0;
            let d_mid = score_function(mid, observations);
            if !d_mid.is_finite() {
                return None;
            }
            if d_mid.abs() < self.params.tolerance || (high - low) < self.params.tolerance {
                return Some(mid);
            }
            if d_mid > 0.0 {
                low = mid;
            } else {
                high = mid;
            }
        }

        Some((low + high) / 2.0)
    }

    fn standard_error(&self, theta: f64, observations: &[Observation]) -> f64 {
        let information: f64 = observations
            .iter()
            .map(|o| {
                let p = probability_correct(theta, o.difficulty);
                o.weight * p * (1.0 - p)
            })
            .sum();

        if information > 0.0 && information.is_finite() {
            (1.0 / information.sqrt()).min(MAX_STANDARD_ERROR)
        } else {
            1.0
        }
    }
}

impl Default for AbilityEstimator {
    fn default() -> Self {
        Self::new(EstimatorParams::default())
    }
}

/// Derivative of the weighted log-likelihood: sum w_i * (x_i - p_i).
fn score_function(theta: f64, observations: &[Observation]) -> f64 {
    observations
        .iter()
        .map(|o| {
            let p = probability_correct(theta, o.difficulty);
            let x = if o.is_correct { 1.0 } else { 0.0 };
            o.weight * (x - p)
        })
        .sum()
}

fn neutral_estimate(learner_id: &str, sample_size: usize, now: DateTime<Utc>) -> AbilityEstimate {
    AbilityEstimate {
        learner_id: learner_id.to_string(),
        theta: 0.0,
        standard_error: 1.0,
        confidence_interval: (-CI_Z, CI_Z),
        sample_size,
        computed_at: now,
    }
}

/// Estimate with default parameters.
pub fn estimate_ability(
    learner_id: &str,
    history: &[ResponseRecord],
    now: DateTime<Utc>,
) -> AbilityEstimate {
    AbilityEstimator::default().estimate(learner_id, history, now)
}

// ==================== Unit Tests ====================
