use crate::consts::{
    DEFAULT_DISTANCE_WEIGHT, DEFAULT_LOCAL_WEIGHT, DEFAULT_MOVE_BUDGET, DEFAULT_RISK_CAP,
    DEFAULT_STALL_LIMIT, DEFAULT_TAU,
};
use crate::error::SwResult;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub risk: RiskWeights,
    #[command(flatten)]
    pub policy: PolicyParams,
}

/// Coefficients of the adjacency risk estimator. These are tuning
/// parameters, not derived values; they can be overridden per run.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    #[arg(long, default_value_t = DEFAULT_LOCAL_WEIGHT)]
    pub local_weight: f64,

    #[arg(long, default_value_t = DEFAULT_DISTANCE_WEIGHT)]
    pub distance_weight: f64,

    #[arg(long, default_value_t = DEFAULT_RISK_CAP)]
    pub risk_cap: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            local_weight: DEFAULT_LOCAL_WEIGHT,
            distance_weight: DEFAULT_DISTANCE_WEIGHT,
            risk_cap: DEFAULT_RISK_CAP,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    /// Maximum reveals per policy run.
    #[arg(long, default_value_t = DEFAULT_MOVE_BUDGET)]
    pub move_budget: usize,

    /// Consecutive blind-guess turns before the run is declared stalled.
    #[arg(long, default_value_t = DEFAULT_STALL_LIMIT)]
    pub stall_limit: usize,

    /// Risk threshold used when the confidence tracker has none set.
    #[arg(long, default_value_t = DEFAULT_TAU)]
    pub default_tau: f64,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            move_budget: DEFAULT_MOVE_BUDGET,
            stall_limit: DEFAULT_STALL_LIMIT,
            default_tau: DEFAULT_TAU,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SwResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
