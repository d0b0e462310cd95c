// ===== sweepcore/src/policy.rs =====
//! The confidence-adaptive turn loop: deduce everything certain, then act
//! on the least-risky remaining cell if it clears the calibration
//! threshold, falling back to the global minimum when nothing does.

use crate::board::{CellState, Grid};
use crate::confidence::BetaConfidence;
use crate::config::PolicyParams;
use crate::deduction::DeductionEngine;
use crate::error::SwResult;
use crate::risk::{AdjacencyEstimator, RiskEstimator, RiskMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A single concrete action at explicit coordinates. The policy only emits
/// reveals; flag actions exist for orchestrators that apply deductions
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal { row: usize, col: usize },
    Flag { row: usize, col: usize },
}

/// Terminal state of a policy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every non-hazard cell revealed.
    Solved,
    /// A forced reveal landed on a hazard.
    Collapsed { row: usize, col: usize },
    /// Deduction and risk estimation found nothing to act on.
    NoMove,
    /// `stall_limit` consecutive blind guesses: turns with no deductive
    /// progress and no candidate at or under the threshold.
    Stalled,
    BudgetExhausted,
}

pub struct DecisionPolicy {
    deduction: DeductionEngine,
    estimator: Box<dyn RiskEstimator + Send>,
    confidence: BetaConfidence,
    params: PolicyParams,
    rng: Option<fastrand::Rng>,
}

impl DecisionPolicy {
    pub fn new(params: PolicyParams) -> Self {
        Self {
            deduction: DeductionEngine::default(),
            estimator: Box::new(AdjacencyEstimator::default()),
            confidence: BetaConfidence::new(),
            params,
            rng: None,
        }
    }

    pub fn with_estimator(mut self, estimator: Box<dyn RiskEstimator + Send>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_deduction(mut self, deduction: DeductionEngine) -> Self {
        self.deduction = deduction;
        self
    }

    /// Seed the tie-break jitter. Unseeded policies break risk ties by
    /// lowest row, then lowest column.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(fastrand::Rng::with_seed(seed));
        self
    }

    pub fn confidence(&self) -> &BetaConfidence {
        &self.confidence
    }

    pub fn confidence_mut(&mut self) -> &mut BetaConfidence {
        &mut self.confidence
    }

    fn tau(&self) -> f64 {
        self.confidence.threshold().unwrap_or(self.params.default_tau)
    }

    /// Pick the reveal target: minimum-risk concealed cell at or under tau,
    /// else the global minimum. Entries for cells no longer concealed are
    /// ignored regardless of what the estimator reported. Exact risk ties
    /// go to the lowest coordinates, or to the jitter rng when one is
    /// seeded.
    fn select(&mut self, grid: &Grid, map: &RiskMap) -> Option<((usize, usize), f64)> {
        let tau = self.tau();
        let concealed: Vec<((usize, usize), f64)> = map
            .iter()
            .filter(|&(&(r, c), _)| grid.cell(r, c).state() == CellState::Concealed)
            .map(|(&pos, &p)| (pos, p))
            .collect();
        let candidates: Vec<((usize, usize), f64)> = concealed
            .iter()
            .copied()
            .filter(|&(_, p)| p <= tau)
            .collect();
        let pool: Vec<((usize, usize), f64)> = if candidates.is_empty() {
            concealed
        } else {
            candidates
        };
        if pool.is_empty() {
            return None;
        }
        let best = pool.iter().map(|&(_, p)| p).fold(f64::INFINITY, f64::min);
        let ties: Vec<(usize, usize)> = pool
            .iter()
            .filter(|&&(_, p)| p == best)
            .map(|&(pos, _)| pos)
            .collect();
        let pick = match &mut self.rng {
            Some(rng) if ties.len() > 1 => ties[rng.usize(0..ties.len())],
            _ => ties[0],
        };
        Some((pick, best))
    }

    /// One decision without applying it: deduction runs to fixpoint (that
    /// mutates the grid), then the chosen reveal is returned for the caller
    /// to apply. The estimated risk is written to the chosen cell's
    /// `confidence` field so the caller can feed it back through
    /// `record_outcome`. `None` means no concealed cell remains to act on.
    pub fn next_action(&mut self, grid: &mut Grid) -> SwResult<Option<Action>> {
        self.deduction.fixpoint(grid)?;
        if grid.is_solved() {
            return Ok(None);
        }
        let map = self.estimator.estimate(grid);
        match self.select(grid, &map) {
            Some(((row, col), risk)) => {
                grid.cell_mut(row, col).confidence = risk;
                Ok(Some(Action::Reveal { row, col }))
            }
            None => Ok(None),
        }
    }

    /// Feedback entry point for actions applied outside `run`, e.g. manual
    /// play interleaved with assisted suggestions.
    pub fn record_outcome(&mut self, predicted: f64, hazard: bool) -> SwResult<()> {
        self.confidence.record_soft(predicted, hazard)
    }

    /// Full turn loop to a terminal outcome, bounded by the move budget and
    /// the stall guard.
    pub fn run(&mut self, grid: &mut Grid) -> SwResult<Outcome> {
        let mut stalled_turns = 0usize;

        for turn in 0..self.params.move_budget {
            let deduced = self.deduction.fixpoint(grid)?;
            if grid.is_solved() {
                info!("solved after {} turns", turn);
                return Ok(Outcome::Solved);
            }

            let map = self.estimator.estimate(grid);
            let Some(((row, col), risk)) = self.select(grid, &map) else {
                return Ok(Outcome::NoMove);
            };

            // A turn with no deductive change and no candidate at or under
            // the threshold is a blind guess.
            if deduced || risk <= self.tau() {
                stalled_turns = 0;
            } else {
                stalled_turns += 1;
                if stalled_turns >= self.params.stall_limit {
                    info!("stalled after {} consecutive blind guesses", stalled_turns);
                    return Ok(Outcome::Stalled);
                }
            }
            debug!("turn {}: reveal ({}, {}) at risk {:.3}", turn, row, col, risk);

            grid.cell_mut(row, col).confidence = risk;
            grid.reveal(row, col, true)?;

            let hazard = grid.cell(row, col).is_hazard();
            self.confidence.record_soft(risk, hazard)?;
            if hazard {
                info!("collapsed on ({}, {}) at turn {}", row, col, turn);
                return Ok(Outcome::Collapsed { row, col });
            }
            if grid.is_solved() {
                info!("solved after {} turns", turn + 1);
                return Ok(Outcome::Solved);
            }
        }
        Ok(Outcome::BudgetExhausted)
    }
}

/// Fraction of non-hazard cells revealed; 1.0 for a grid with none.
pub fn resolved_fraction(grid: &Grid) -> f64 {
    let safe_total = grid.rows() * grid.cols() - grid.hazard_count();
    if safe_total == 0 {
        return 1.0;
    }
    let safe_revealed = grid
        .cells()
        .filter(|c| !c.is_hazard() && c.state() == CellState::Revealed)
        .count();
    safe_revealed as f64 / safe_total as f64
}
