//! Learning blockage detection.
//!
//! Analyzes a learner's ordered response window for three independent
//! patterns: a plateau (accuracy stuck at the edge of competence), a
//! regression (accuracy deteriorating across the window), and a slowdown
//! (response times growing). A learner can trigger several at once; every
//! call recomputes from scratch.
//!
//! Sub-checks below their minimum sample size report insufficient data and
//! are simply omitted from the result instead of failing the whole call.

use tracing::debug;

use crate::config::BlockageParams;
use crate::sanitize;
use crate::types::{
    BlockageKind, BlockagePattern, BlockageReport, Intervention, ResponseRecord, Severity, EPSILON,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{check} check needs at least {required} responses, got {actual}")]
pub struct InsufficientDataError {
    pub check: &'static str,
    pub required: usize,
    pub actual: usize,
}

pub struct BlockageDetector {
    params: BlockageParams,
}

impl BlockageDetector {
    pub fn new(params: BlockageParams) -> Self {
        Self { params }
    }

    /// Run all pattern checks over the history. Input order does not
    /// matter; records are sorted by timestamp before windowing.
    pub fn analyze(&self, history: &[ResponseRecord]) -> BlockageReport {
        let mut ordered: Vec<&ResponseRecord> = history.iter().collect();
        ordered.sort_by_key(|r| r.timestamp);

        let quantity = self.data_quantity_factor(ordered.len());

        let mut patterns = Vec::new();
        let checks = [
            self.check_plateau(&ordered, quantity),
            self.check_regression(&ordered, quantity),
            self.check_time_increase(&ordered, quantity),
        ];
        for check in checks {
            match check {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}
                Err(insufficient) => {
                    debug!(%insufficient, "blockage check skipped");
                }
            }
        }

        let confidence = self.overall_confidence(quantity, &patterns);
        let suggestions = suggestions_for(&patterns);

        BlockageReport {
            patterns,
            confidence,
            suggestions,
        }
    }

    fn check_plateau(
        &self,
        ordered: &[&ResponseRecord],
        quantity: f64,
    ) -> Result<Option<BlockagePattern>, InsufficientDataError> {
        let n = ordered.len();
        if n < self.params.plateau_window {
            return Err(InsufficientDataError {
                check: "plateau",
                required: self.params.plateau_window,
                actual: n,
            });
        }

        let window = &ordered[n - self.params.plateau_window..];
        let accuracy = accuracy_of(window);
        if accuracy < self.params.plateau_low || accuracy > self.params.plateau_high {
            return Ok(None);
        }

        let distance = (accuracy - 0.5).abs();
        let severity = if distance <= self.params.plateau_high_band {
            Severity::High
        } else if distance <= self.params.plateau_medium_band {
            Severity::Medium
        } else {
            Severity::Low
        };

        Ok(Some(BlockagePattern {
            kind: BlockageKind::Plateau,
            severity,
            confidence: pattern_confidence(severity, quantity),
            description: format!(
                "accuracy stuck at {:.0}% over the last {} responses, neither mastering nor failing",
                accuracy * 100.0,
                window.len()
            ),
        }))
    }

    fn check_regression(
        &self,
        ordered: &[&ResponseRecord],
        quantity: f64,
    ) -> Result<Option<BlockagePattern>, InsufficientDataError> {
        let n = ordered.len();
        if n < self.params.min_edge_samples {
            return Err(InsufficientDataError {
                check: "regression",
                required: self.params.min_edge_samples,
                actual: n,
            });
        }

        let edge = self.params.edge_window;
        let early_accuracy = accuracy_of(&ordered[..edge]);
        let late_accuracy = accuracy_of(&ordered[n - edge..]);
        let drop = early_accuracy - late_accuracy;
        if drop <= self.params.regression_drop {
            return Ok(None);
        }

        let severity = if drop > self.params.regression_high_drop {
            Severity::High
        } else if drop > self.params.regression_medium_drop {
            Severity::Medium
        } else {
            Severity::Low
        };

        Ok(Some(BlockagePattern {
            kind: BlockageKind::Regression,
            severity,
            confidence: pattern_confidence(severity, quantity),
            description: format!(
                "accuracy fell from {:.0}% to {:.0}% across the window",
                early_accuracy * 100.0,
                late_accuracy * 100.0
            ),
        }))
    }

    fn check_time_increase(
        &self,
        ordered: &[&ResponseRecord],
        quantity: f64,
    ) -> Result<Option<BlockagePattern>, InsufficientDataError> {
        let n = ordered.len();
        if n < self.params.min_edge_samples {
            return Err(InsufficientDataError {
                check: "time_increase",
                required: self.params.min_edge_samples,
                actual: n,
            });
        }

        let edge = self.params.edge_window;
        let early_mean = mean_response_time(&ordered[..edge]);
        let late_mean = mean_response_time(&ordered[n - edge..]);
        if late_mean <= EPSILON {
            return Ok(None);
        }

        let ratio = late_mean / early_mean.max(EPSILON);
        if ratio <= self.params.time_increase_ratio {
            return Ok(None);
        }

        let severity = if ratio >= self.params.time_high_ratio {
            Severity::High
        } else if ratio >= self.params.time_medium_ratio {
            Severity::Medium
        } else {
            Severity::Low
        };

        Ok(Some(BlockagePattern {
            kind: BlockageKind::TimeIncrease,
            severity,
            confidence: pattern_confidence(severity, quantity),
            description: format!(
                "mean response time grew from {:.1}s to {:.1}s",
                early_mean, late_mean
            ),
        }))
    }

    fn data_quantity_factor(&self, n: usize) -> f64 {
        (n as f64 / self.params.data_saturation.max(1) as f64).min(1.0)
    }

    fn overall_confidence(&self, quantity: f64, patterns: &[BlockagePattern]) -> f64 {
        let weighted: f64 = patterns
            .iter()
            .map(|p| match p.kind {
                BlockageKind::Plateau => self.params.plateau_weight,
                BlockageKind::Regression => self.params.regression_weight,
                BlockageKind::TimeIncrease => self.params.time_weight,
            })
            .sum();
        sanitize::clamp_unit(0.3 * quantity + 0.7 * weighted)
    }
}

impl Default for BlockageDetector {
    fn default() -> Self {
        Self::new(BlockageParams::default())
    }
}

/// Analyze with default parameters.
pub fn detect_blockages(history: &[ResponseRecord]) -> BlockageReport {
    BlockageDetector::default().analyze(history)
}

fn accuracy_of(window: &[&ResponseRecord]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let correct = window.iter().filter(|r| r.is_correct).count();
    correct as f64 / window.len() as f64
}

fn mean_response_time(window: &[&ResponseRecord]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let total: f64 = window
        .iter()
        .map(|r| sanitize::usable_response_time(r.response_time_secs))
        .sum();
    total / window.len() as f64
}

fn pattern_confidence(severity: Severity, quantity: f64) -> f64 {
    let base = match severity {
        Severity::Low => 0.4,
        Severity::Medium => 0.65,
        Severity::High => 0.85,
    };
    (base * quantity).clamp(0.05, 1.0)
}

fn suggestions_for(patterns: &[BlockagePattern]) -> Vec<Intervention> {
    patterns
        .iter()
        .map(|pattern| Intervention {
            kind: pattern.kind,
            suggestion: match pattern.kind {
                BlockageKind::Plateau => {
                    "schedule a targeted review of the current level before advancing".to_string()
                }
                BlockageKind::Regression => {
                    "intervene now: step back one level and revisit the recently missed material"
                        .to_string()
                }
                BlockageKind::TimeIncrease => {
                    "offer methodological support and suggest a short break, responses are slowing"
                        .to_string()
                }
            },
        })
        .collect()
}

// ==================== Unit Tests ====================
