// ===== sweepcore/src/board/mod.rs =====
pub mod builder;

pub use self::builder::GridBuilder;

use crate::consts::HAZARD_CLUE;
use crate::error::{SwResult, SweepError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Per-cell lifecycle. Transitions are one-way: a cell leaves `Concealed`
/// exactly once and never returns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum CellState {
    Concealed,
    Revealed,
    Flagged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) state: CellState,
    pub(crate) hazard: bool,
    pub(crate) clue: Option<i8>,
    /// Last probability the risk estimator assigned to this cell.
    /// Inspection only; never read back by the solver.
    pub(crate) confidence: f64,
    row: usize,
    col: usize,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize, hazard: bool) -> Self {
        Self {
            state: CellState::Concealed,
            hazard,
            clue: if hazard { Some(HAZARD_CLUE) } else { None },
            confidence: 0.0,
            row,
            col,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_hazard(&self) -> bool {
        self.hazard
    }

    pub fn clue(&self) -> Option<i8> {
        self.clue
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

/// Rectangular board of cells with an optional adjacency override for
/// non-spatial domains. When an override is present, physical adjacency
/// is ignored entirely.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    hazard_count: usize,
    adjacency: Option<HashMap<(usize, usize), Vec<(usize, usize)>>>,
    last_safe_reveal: Option<(usize, usize)>,
}

impl Grid {
    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        cells: Vec<Cell>,
        adjacency: Option<HashMap<(usize, usize), Vec<(usize, usize)>>>,
    ) -> Self {
        let hazard_count = cells.iter().filter(|c| c.hazard).count();
        Self {
            rows,
            cols,
            cells,
            hazard_count,
            adjacency,
            last_safe_reveal: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn hazard_count(&self) -> usize {
        self.hazard_count
    }

    pub fn last_safe_reveal(&self) -> Option<(usize, usize)> {
        self.last_safe_reveal
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> SwResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(SweepError::Validation(format!(
                "coordinates ({}, {}) outside {}x{} grid",
                row, col, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Borrow a cell. Panics on out-of-range coordinates; builders and the
    /// policy only hand out in-range ones.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let i = self.idx(row, col);
        &mut self.cells[i]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Neighbor coordinates under the active relation: Chebyshev distance 1
    /// by default, or the construction-time override.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        if let Some(map) = &self.adjacency {
            return map.get(&(row, col)).cloned().unwrap_or_default();
        }
        let mut out = Vec::with_capacity(8);
        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as i64 + dr;
                let nc = col as i64 + dc;
                if nr >= 0 && nr < self.rows as i64 && nc >= 0 && nc < self.cols as i64 {
                    out.push((nr as usize, nc as usize));
                }
            }
        }
        out
    }

    /// Neighbors currently in `state`.
    pub fn neighbors_in(&self, row: usize, col: usize, state: CellState) -> Vec<(usize, usize)> {
        self.neighbors(row, col)
            .into_iter()
            .filter(|&(r, c)| self.cell(r, c).state == state)
            .collect()
    }

    /// Reveal a concealed cell. With `flood`, a zero clue cascades to the
    /// whole zero region and its border. No-op if the cell is already
    /// revealed or flagged.
    pub fn reveal(&mut self, row: usize, col: usize, flood: bool) -> SwResult<()> {
        self.check_bounds(row, col)?;
        let mut stack = vec![(row, col)];
        while let Some((r, c)) = stack.pop() {
            let i = self.idx(r, c);
            if self.cells[i].state != CellState::Concealed {
                continue;
            }
            self.cells[i].state = CellState::Revealed;
            if !self.cells[i].hazard {
                self.last_safe_reveal = Some((r, c));
            }
            if flood && self.cells[i].clue == Some(0) {
                stack.extend(self.neighbors(r, c));
            }
        }
        Ok(())
    }

    /// Mark a concealed cell as a suspected hazard. Informational only:
    /// a later `reveal` is not blocked by the flag.
    pub fn flag(&mut self, row: usize, col: usize) -> SwResult<()> {
        self.check_bounds(row, col)?;
        let i = self.idx(row, col);
        if self.cells[i].state == CellState::Concealed {
            self.cells[i].state = CellState::Flagged;
            debug!("flagged ({}, {})", row, col);
        }
        Ok(())
    }

    pub fn concealed_count(&self) -> usize {
        self.count_in(CellState::Concealed)
    }

    pub fn flagged_count(&self) -> usize {
        self.count_in(CellState::Flagged)
    }

    pub fn revealed_count(&self) -> usize {
        self.count_in(CellState::Revealed)
    }

    fn count_in(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Hazards not yet accounted for by flags, floored at zero.
    pub fn hazards_remaining(&self) -> usize {
        self.hazard_count.saturating_sub(self.flagged_count())
    }

    /// True once every non-hazard cell is revealed.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|c| c.hazard || c.state == CellState::Revealed)
    }

    /// Structural consistency check: every revealed clue must equal the
    /// hazard count of its neighborhood. Diagnostic, not used during play.
    pub fn is_valid(&self) -> bool {
        for cell in &self.cells {
            if cell.state != CellState::Revealed {
                continue;
            }
            if let Some(k) = cell.clue {
                if k < 0 {
                    continue;
                }
                let hazards = self
                    .neighbors(cell.row, cell.col)
                    .iter()
                    .filter(|&&(r, c)| self.cell(r, c).hazard)
                    .count();
                if hazards != k as usize {
                    return false;
                }
            }
        }
        true
    }
}
