use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Lower bound of the latent ability scale
pub const THETA_MIN: f64 = -3.0;

/// Upper bound of the latent ability scale
pub const THETA_MAX: f64 = 3.0;

/// Lower bound of the numeric difficulty scale
pub const DIFFICULTY_MIN: f64 = -2.0;

/// Upper bound of the numeric difficulty scale
pub const DIFFICULTY_MAX: f64 = 2.0;

/// Cap on reported standard error; anything above this is non-informative
pub const MAX_STANDARD_ERROR: f64 = 2.0;

/// Two-sided 95% normal quantile used for confidence intervals
pub const CI_Z: f64 = 1.96;

/// Default discrimination for items without calibrated parameters
pub const DEFAULT_DISCRIMINATION: f64 = 1.0;

/// Default guessing probability for 4-option items
pub const DEFAULT_GUESSING: f64 = 0.25;

pub const EPSILON: f64 = 1e-10;

// ==================== Difficulty Ladder ====================

/// Five-level ordered difficulty ladder.
///
/// The ordering derives `Ord`, so `Hard > Medium` holds and ladder
/// progression can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum DifficultyLevel {
    VeryEasy,
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

/// All levels in ascending order of difficulty.
pub const ALL_LEVELS: [DifficultyLevel; 5] = [
    DifficultyLevel::VeryEasy,
    DifficultyLevel::Easy,
    DifficultyLevel::Medium,
    DifficultyLevel::Hard,
    DifficultyLevel::VeryHard,
];

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryEasy => "very_easy",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::VeryHard => "very_hard",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "very_easy" => Self::VeryEasy,
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            "very_hard" => Self::VeryHard,
            _ => Self::Medium,
        }
    }

    pub fn harder(&self) -> Self {
        match self {
            Self::VeryEasy => Self::Easy,
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            _ => Self::VeryHard,
        }
    }

    pub fn easier(&self) -> Self {
        match self {
            Self::VeryHard => Self::Hard,
            Self::Hard => Self::Medium,
            Self::Medium => Self::Easy,
            _ => Self::VeryEasy,
        }
    }
}

// ==================== Input Records ====================

/// One answered question, as read from the response store.
///
/// Immutable input; the core never writes these back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub learner_id: String,
    pub item_id: String,
    pub subject: String,
    pub difficulty: DifficultyLevel,
    pub is_correct: bool,
    /// Seconds spent answering, >= 0
    pub response_time_secs: f64,
    pub timestamp: DateTime<Utc>,
}

/// Item metadata supplied by the item bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemParameters {
    pub item_id: String,
    pub subject: String,
    pub difficulty: DifficultyLevel,
    /// Slope of the response curve around the difficulty point, > 0
    pub discrimination: f64,
    /// Baseline probability of a lucky correct answer, in [0, 1)
    pub guessing: f64,
}

impl ItemParameters {
    /// Item with uncalibrated defaults (discrimination 1.0, guessing 0.25).
    pub fn new(item_id: impl Into<String>, subject: impl Into<String>, difficulty: DifficultyLevel) -> Self {
        Self {
            item_id: item_id.into(),
            subject: subject.into(),
            difficulty,
            discrimination: DEFAULT_DISCRIMINATION,
            guessing: DEFAULT_GUESSING,
        }
    }
}

// ==================== Derived Results ====================

/// Point estimate of a learner's proficiency with its uncertainty.
///
/// Produced wholesale on every estimation call, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityEstimate {
    pub learner_id: String,
    /// Latent ability in [-3, 3]
    pub theta: f64,
    /// Uncertainty in (0, 2]
    pub standard_error: f64,
    /// theta +/- 1.96 * standard_error
    pub confidence_interval: (f64, f64),
    pub sample_size: usize,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Recommended move along the difficulty ladder after a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyDelta {
    Decrease,
    SlightDecrease,
    Maintain,
    SlightIncrease,
    Increase,
}

/// Predicted outcome for one learner on one item difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Expected score in 0..100
    pub predicted_score: f64,
    /// Probability of a correct response in 0..1
    pub probability_correct: f64,
    pub confidence: ConfidenceLevel,
    pub recommended_delta: DifficultyDelta,
}

/// Outcome of a difficulty adaptation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAdjustment {
    pub current_level: DifficultyLevel,
    pub new_level: DifficultyLevel,
    /// Actual minus predicted score, in -100..100
    pub performance_gap: f64,
    pub justification: String,
}

// ==================== Blockage Analysis ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockageKind {
    Plateau,
    Regression,
    TimeIncrease,
}

impl BlockageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plateau => "plateau",
            Self::Regression => "regression",
            Self::TimeIncrease => "time_increase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One detected learning blockage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockagePattern {
    pub kind: BlockageKind,
    pub severity: Severity,
    /// Confidence in this specific pattern, 0..1
    pub confidence: f64,
    pub description: String,
}

/// Suggested intervention for a triggered pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub kind: BlockageKind,
    pub suggestion: String,
}

/// Full result of one blockage analysis pass.
///
/// Recomputed from scratch on every call; patterns are never merged
/// across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockageReport {
    pub patterns: Vec<BlockagePattern>,
    /// Overall confidence in the analysis, 0..1
    pub confidence: f64,
    pub suggestions: Vec<Intervention>,
}

impl BlockageReport {
    pub fn has(&self, kind: BlockageKind) -> bool {
        self.patterns.iter().any(|p| p.kind == kind)
    }
}

// ==================== Unit Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(DifficultyLevel::VeryEasy < DifficultyLevel::Easy);
        assert!(DifficultyLevel::Hard < DifficultyLevel::VeryHard);
        assert_eq!(ALL_LEVELS.len(), 5);
    }

    #[test]
    fn test_level_ladder_steps() {
        assert_eq!(DifficultyLevel::Medium.harder(), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::VeryHard.harder(), DifficultyLevel::VeryHard);
        assert_eq!(DifficultyLevel::Medium.easier(), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::VeryEasy.easier(), DifficultyLevel::VeryEasy);
    }

    #[test]
    fn test_level_parse_roundtrip() {
        for level in ALL_LEVELS {
            assert_eq!(DifficultyLevel::parse(level.as_str()), level);
        }
        assert_eq!(DifficultyLevel::parse("garbage"), DifficultyLevel::Medium);
    }

    #[test]
    fn test_item_defaults() {
        let item = ItemParameters::new("item_1", "math", DifficultyLevel::Hard);
        assert!((item.discrimination - 1.0).abs() < EPSILON);
        assert!((item.guessing - 0.25).abs() < EPSILON);
    }
}
