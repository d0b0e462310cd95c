// ===== sweepcore/src/deduction.rs =====
//! Logical deduction over revealed clues. Every rule here is sound: a cell
//! is only flagged when it is provably a hazard and only revealed when it
//! is provably safe. No probability, no guessing.

use crate::board::{CellState, Grid};
use crate::error::SwResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeductionOptions {
    /// Diagnostic mode: flag hazards straight from ground truth instead of
    /// deducing them. Threaded in explicitly; never read from the
    /// environment.
    pub oracle_flags: bool,
}

pub struct DeductionEngine {
    options: DeductionOptions,
}

/// One constraint extracted from a revealed clue: `remaining` hazards are
/// distributed among the `concealed` neighbor set.
struct Constraint {
    row: usize,
    col: usize,
    concealed: BTreeSet<(usize, usize)>,
    remaining: i8,
}

impl Default for DeductionEngine {
    fn default() -> Self {
        Self::new(DeductionOptions::default())
    }
}

impl DeductionEngine {
    pub fn new(options: DeductionOptions) -> Self {
        Self { options }
    }

    /// Saturation rule: when a clue's unaccounted hazards exactly fill its
    /// concealed neighborhood, every concealed neighbor is a hazard.
    pub fn flag_saturated(&self, grid: &mut Grid) -> SwResult<bool> {
        let mut changed = false;
        for (row, col, k) in clue_cells(grid) {
            let flagged = grid.neighbors_in(row, col, CellState::Flagged).len() as i8;
            let concealed = grid.neighbors_in(row, col, CellState::Concealed);
            let remaining = k - flagged;
            if remaining > 0 && concealed.len() as i8 == remaining {
                for (r, c) in concealed {
                    grid.flag(r, c)?;
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    /// Exhaustion rule: when a clue's hazards are all flagged, its remaining
    /// concealed neighbors are safe and are revealed with flood.
    pub fn reveal_exhausted(&self, grid: &mut Grid) -> SwResult<bool> {
        let mut changed = false;
        for (row, col, k) in clue_cells(grid) {
            let flagged = grid.neighbors_in(row, col, CellState::Flagged).len() as i8;
            if flagged != k {
                continue;
            }
            for (r, c) in grid.neighbors_in(row, col, CellState::Concealed) {
                grid.reveal(r, c, true)?;
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Subset rule: for constraints A ⊂ B, the difference B \ A carries
    /// exactly `remaining(B) - remaining(A)` hazards. Zero means the
    /// difference is safe; a full difference means it is all hazards.
    pub fn resolve_subsets(&self, grid: &mut Grid) -> SwResult<bool> {
        let constraints = extract_constraints(grid);
        for a in &constraints {
            for b in &constraints {
                if a.concealed.len() >= b.concealed.len() || !a.concealed.is_subset(&b.concealed) {
                    continue;
                }
                let diff: Vec<(usize, usize)> =
                    b.concealed.difference(&a.concealed).copied().collect();
                let diff_hazards = b.remaining - a.remaining;
                if diff_hazards == 0 {
                    debug!(
                        "subset ({},{}) ⊂ ({},{}): difference is safe",
                        a.row, a.col, b.row, b.col
                    );
                    for (r, c) in diff {
                        grid.reveal(r, c, true)?;
                    }
                    return Ok(true);
                }
                if diff_hazards as usize == diff.len() {
                    debug!(
                        "subset ({},{}) ⊂ ({},{}): difference is all hazards",
                        a.row, a.col, b.row, b.col
                    );
                    for (r, c) in diff {
                        grid.flag(r, c)?;
                    }
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Apply all rules until a full pass makes no change. Returns whether
    /// any cell changed state across the whole run. Idempotent: a second
    /// run on an unchanged grid reports `false`.
    pub fn fixpoint(&self, grid: &mut Grid) -> SwResult<bool> {
        let mut any = false;
        if self.options.oracle_flags {
            any |= self.flag_from_ground_truth(grid)?;
        }
        loop {
            let flagged = self.flag_saturated(grid)?;
            let revealed = self.reveal_exhausted(grid)?;
            let split = self.resolve_subsets(grid)?;
            if !(flagged || revealed || split) {
                break;
            }
            any = true;
        }
        Ok(any)
    }

    fn flag_from_ground_truth(&self, grid: &mut Grid) -> SwResult<bool> {
        let targets: Vec<(usize, usize)> = grid
            .cells()
            .filter(|c| c.is_hazard() && c.state() == CellState::Concealed)
            .map(|c| (c.row(), c.col()))
            .collect();
        let changed = !targets.is_empty();
        for (r, c) in targets {
            grid.flag(r, c)?;
        }
        Ok(changed)
    }
}

fn clue_cells(grid: &Grid) -> Vec<(usize, usize, i8)> {
    grid.cells()
        .filter(|c| c.state() == CellState::Revealed)
        .filter_map(|c| match c.clue() {
            Some(k) if k > 0 => Some((c.row(), c.col(), k)),
            _ => None,
        })
        .collect()
}

fn extract_constraints(grid: &Grid) -> Vec<Constraint> {
    let mut out = Vec::new();
    for (row, col, k) in clue_cells(grid) {
        let flagged = grid.neighbors_in(row, col, CellState::Flagged).len() as i8;
        let concealed: BTreeSet<(usize, usize)> = grid
            .neighbors_in(row, col, CellState::Concealed)
            .into_iter()
            .collect();
        let remaining = k - flagged;
        if !concealed.is_empty() && remaining >= 0 {
            out.push(Constraint {
                row,
                col,
                concealed,
                remaining,
            });
        }
    }
    out
}
