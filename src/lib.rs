//! # adapt-algo - adaptive assessment core algorithms
//!
//! This crate provides the pure estimation core of an adaptive assessment
//! platform:
//!
//! - **AbilityEstimator** - recency-weighted Rasch maximum-likelihood
//!   estimation of a learner's latent proficiency
//! - **PerformancePredictor** - probability of success on a candidate item,
//!   with a confidence label and a recommended difficulty move
//! - **ItemSelector** - maximum-information choice of the next item
//! - **DifficultyAdapter** - observed-vs-predicted performance mapped onto a
//!   five-level difficulty ladder
//! - **BlockageDetector** - plateau, regression, and slowdown patterns over
//!   a response window
//!
//! ## Design
//!
//! Every component is a pure, stateless computation over a caller-supplied
//! response history: no I/O, no shared mutable state, no clocks read
//! internally (the current instant is always an explicit argument).
//! Estimation never aborts a learner-facing flow; the only hard error in
//! the crate is an empty candidate pool during item selection.
//!
//! ## Module structure
//!
//! - [`types`] - shared records, enums, and numeric constants
//! - [`config`] - tunable parameters with production defaults
//! - [`scale`] - categorical ladder to numeric difficulty conversion
//! - [`ability`] - ability estimation (single and rayon batch)
//! - [`prediction`] - Rasch and 3PL performance prediction
//! - [`selection`] - next-item selection and candidate ranking
//! - [`adaptation`] - difficulty ladder adaptation
//! - [`blockage`] - blockage pattern detection
//! - [`sanitize`] - numeric hygiene helpers

// ============================================================================
// Module declarations
// ============================================================================

pub mod ability;
pub mod adaptation;
pub mod blockage;
pub mod config;
pub mod prediction;
pub mod sanitize;
pub mod scale;
pub mod selection;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use ability::{estimate_ability, AbilityEstimator};

pub use prediction::{
    predict_performance, predict_with_item, probability_correct, probability_correct_3pl,
};

pub use selection::{rank_candidates, select_next_item, SelectionError};

pub use adaptation::adapt_difficulty;

pub use blockage::{detect_blockages, BlockageDetector, InsufficientDataError};

pub use config::{AdapterParams, BlockageParams, EstimatorParams};
