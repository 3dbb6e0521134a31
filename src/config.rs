use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorParams {
    /// Half-life of the recency weight, in days
    pub half_life_days: f64,
    /// Minimum weight for stale responses
    pub weight_floor: f64,
    /// Hard cap on optimizer iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the likelihood derivative
    pub tolerance: f64,
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            half_life_days: 30.0,
            weight_floor: 0.1,
            max_iterations: 200,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterParams {
    /// Sessions shorter than this get the conservative factor
    pub early_session_threshold: usize,
    pub early_factor: f64,
    pub late_factor: f64,
    /// Performance gap (in score points) that triggers an adjustment
    pub gap_threshold: f64,
    /// Cap on the normalized gap contribution
    pub max_gap_contribution: f64,
}

impl Default for AdapterParams {
    fn default() -> Self {
        Self {
            early_session_threshold: 5,
            early_factor: 0.3,
            late_factor: 0.5,
            gap_threshold: 20.0,
            max_gap_contribution: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockageParams {
    /// Responses needed for the plateau check
    pub plateau_window: usize,
    pub plateau_low: f64,
    pub plateau_high: f64,
    /// Responses compared at each end of the regression and slowdown windows
    pub edge_window: usize,
    /// Responses needed for the regression and slowdown checks
    pub min_edge_samples: usize,
    /// Accuracy drop that counts as regression
    pub regression_drop: f64,
    /// Late/early mean response time ratio that counts as slowdown
    pub time_increase_ratio: f64,
    /// Sample size at which the data-quantity factor saturates
    pub data_saturation: usize,
    pub plateau_weight: f64,
    pub regression_weight: f64,
    pub time_weight: f64,
    /// Severity bands: plateau distance from 0.5 accuracy
    pub plateau_high_band: f64,
    pub plateau_medium_band: f64,
    /// Severity bands: regression drop size
    pub regression_high_drop: f64,
    pub regression_medium_drop: f64,
    /// Severity bands: slowdown ratio
    pub time_high_ratio: f64,
    pub time_medium_ratio: f64,
}

impl Default for BlockageParams {
    fn default() -> Self {
        Self {
            plateau_window: 8,
            plateau_low: 0.4,
            plateau_high: 0.6,
            edge_window: 3,
            min_edge_samples: 6,
            regression_drop: 0.3,
            time_increase_ratio: 1.5,
            data_saturation: 10,
            plateau_weight: 0.4,
            regression_weight: 0.4,
            time_weight: 0.2,
            plateau_high_band: 0.05,
            plateau_medium_band: 0.08,
            regression_high_drop: 0.5,
            regression_medium_drop: 0.4,
            time_high_ratio: 2.5,
            time_medium_ratio: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let est = EstimatorParams::default();
        assert!(est.half_life_days > 0.0);
        assert!(est.weight_floor > 0.0 && est.weight_floor < 1.0);
        assert!(est.max_iterations > 0);

        let adapter = AdapterParams::default();
        assert!(adapter.early_factor < adapter.late_factor);

        let blockage = BlockageParams::default();
        assert!(blockage.plateau_low < blockage.plateau_high);
        assert!(blockage.min_edge_samples >= 2 * blockage.edge_window);
        let weight_sum =
            blockage.plateau_weight + blockage.regression_weight + blockage.time_weight;
        assert!((weight_sum - 1.0).abs() < 1e-9);
    }
}
