// ===== sweepcore/src/risk.rs =====
//! Hazard probability estimation for cells the deduction engine could not
//! resolve. Estimators are pure functions of grid state: no mutation, and
//! repeated calls return identical maps.

use crate::board::{CellState, Grid};
use crate::config::RiskWeights;
use std::collections::BTreeMap;

/// Marginal hazard probability per concealed cell. These are independent
/// estimates, not a joint distribution; they need not sum to 1.
pub type RiskMap = BTreeMap<(usize, usize), f64>;

pub trait RiskEstimator {
    /// One probability in [0, 1] for every concealed cell.
    fn estimate(&self, grid: &Grid) -> RiskMap;
}

/// Default estimator: global base rate adjusted by two local signals.
///
/// `base + local_weight * adjacency + distance_weight * frontier_distance`,
/// clamped to `risk_cap`. Certainty of hazard is reserved for flagged
/// cells, which never appear in the map.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyEstimator {
    weights: RiskWeights,
}

impl AdjacencyEstimator {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }
}

impl RiskEstimator for AdjacencyEstimator {
    fn estimate(&self, grid: &Grid) -> RiskMap {
        let mut map = RiskMap::new();
        let concealed: Vec<(usize, usize)> = grid
            .cells()
            .filter(|c| c.state() == CellState::Concealed)
            .map(|c| (c.row(), c.col()))
            .collect();
        if concealed.is_empty() {
            return map;
        }

        let base = grid.hazards_remaining() as f64 / concealed.len() as f64;
        let span = (grid.rows() + grid.cols()) as f64;

        for (row, col) in concealed {
            let concealed_nbrs = grid.neighbors_in(row, col, CellState::Concealed).len();
            let local = if concealed_nbrs == 0 {
                0.0
            } else {
                grid.neighbors_in(row, col, CellState::Flagged).len() as f64
                    / concealed_nbrs as f64
            };

            // Cells far from the last confirmed-safe frontier are riskier.
            let distance = match grid.last_safe_reveal() {
                Some((sr, sc)) => {
                    let manhattan = sr.abs_diff(row) + sc.abs_diff(col);
                    manhattan as f64 / span
                }
                None => 0.0,
            };

            let p = base
                + self.weights.local_weight * local
                + self.weights.distance_weight * distance;
            map.insert((row, col), p.clamp(0.0, self.weights.risk_cap));
        }
        map
    }
}

/// Comparison estimator: uniform probability with a small deterministic
/// alternating perturbation by cell parity. Used in tests and as a
/// baseline against the adjacency estimator.
#[derive(Debug, Clone)]
pub struct SpreadEstimator {
    tau: f64,
}

impl SpreadEstimator {
    pub fn new(tau: f64) -> Self {
        Self { tau }
    }
}

impl RiskEstimator for SpreadEstimator {
    fn estimate(&self, grid: &Grid) -> RiskMap {
        let concealed: Vec<(usize, usize)> = grid
            .cells()
            .filter(|c| c.state() == CellState::Concealed)
            .map(|c| (c.row(), c.col()))
            .collect();
        let mut map = RiskMap::new();
        if concealed.is_empty() {
            return map;
        }
        let base = 1.0 / concealed.len() as f64;
        for (row, col) in concealed {
            let modifier = if (row + col) % 2 == 0 {
                self.tau
            } else {
                -self.tau
            };
            map.insert((row, col), (base + modifier).clamp(0.0, 1.0));
        }
        map
    }
}
