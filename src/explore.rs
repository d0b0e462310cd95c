// ===== sweepcore/src/explore.rs =====
//! Parallel fan-out of independent policy lanes. Each lane owns its own
//! grid clone and confidence tracker; lanes never share mutable state and
//! a failure in one lane never aborts its siblings.

use crate::board::Grid;
use crate::config::Config;
use crate::error::SwResult;
use crate::policy::{resolved_fraction, DecisionPolicy, Outcome};
use crate::risk::AdjacencyEstimator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum LaneStatus {
    Solved,
    Collapsed,
    Stalled,
    BudgetExhausted,
    NoMove,
    Failed,
}

impl From<Outcome> for LaneStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Solved => LaneStatus::Solved,
            Outcome::Collapsed { .. } => LaneStatus::Collapsed,
            Outcome::NoMove => LaneStatus::NoMove,
            Outcome::Stalled => LaneStatus::Stalled,
            Outcome::BudgetExhausted => LaneStatus::BudgetExhausted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneReport {
    pub lane: usize,
    pub status: LaneStatus,
    /// Fraction of non-hazard cells the lane resolved; absent for lanes
    /// that failed before producing one.
    pub quality: Option<f64>,
    pub revealed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationSummary {
    pub lanes: Vec<LaneReport>,
}

impl ExplorationSummary {
    pub fn collapsed_lanes(&self) -> Vec<usize> {
        self.lanes
            .iter()
            .filter(|l| l.status == LaneStatus::Collapsed)
            .map(|l| l.lane)
            .collect()
    }

    /// Mean lane quality over lanes that produced one.
    pub fn mean_quality(&self) -> Option<f64> {
        let scores: Vec<f64> = self.lanes.iter().filter_map(|l| l.quality).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Run `lanes` independent policy loops over clones of `grid` and join.
/// Lane seeds derive from the base seed so a fixed seed reproduces every
/// lane exactly.
pub fn explore(grid: &Grid, config: &Config, lanes: usize, seed: Option<u64>) -> ExplorationSummary {
    info!("exploring {} lanes over {}x{} grid", lanes, grid.rows(), grid.cols());
    let reports: Vec<LaneReport> = (0..lanes)
        .into_par_iter()
        .map(|lane| {
            let lane_seed = seed.map(|s| s + lane as u64);
            let result = catch_unwind(AssertUnwindSafe(|| run_lane(grid, config, lane_seed)));
            match result {
                Ok(Ok((outcome, quality, revealed))) => LaneReport {
                    lane,
                    status: outcome.into(),
                    quality: Some(quality),
                    revealed,
                },
                Ok(Err(e)) => {
                    warn!("lane {} failed: {}", lane, e);
                    LaneReport {
                        lane,
                        status: LaneStatus::Failed,
                        quality: None,
                        revealed: 0,
                    }
                }
                Err(_) => {
                    warn!("lane {} panicked", lane);
                    LaneReport {
                        lane,
                        status: LaneStatus::Failed,
                        quality: None,
                        revealed: 0,
                    }
                }
            }
        })
        .collect();

    ExplorationSummary { lanes: reports }
}

fn run_lane(grid: &Grid, config: &Config, seed: Option<u64>) -> SwResult<(Outcome, f64, usize)> {
    let mut lane_grid = grid.clone();
    let mut policy = DecisionPolicy::new(config.policy.clone())
        .with_estimator(Box::new(AdjacencyEstimator::new(config.risk.clone())));
    if let Some(s) = seed {
        policy = policy.with_seed(s);
    }
    let outcome = policy.run(&mut lane_grid)?;
    Ok((
        outcome,
        resolved_fraction(&lane_grid),
        lane_grid.revealed_count(),
    ))
}
