// ===== sweepcore/src/board/builder.rs =====
use super::{Cell, CellState, Grid};
use crate::consts::HAZARD_CLUE;
use crate::error::{SwResult, SweepError};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

/// Construction-time collaborator for the solver core. Guarantees the grid
/// invariants (rectangularity, fixed hazards, clue consistency) before a
/// `Grid` ever reaches the deduction engine.
#[derive(Debug, Default)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    hazards: HashSet<(usize, usize)>,
    pre_revealed: Vec<((usize, usize), i8)>,
    adjacency: Option<HashMap<(usize, usize), Vec<(usize, usize)>>>,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn hazard_at(mut self, row: usize, col: usize) -> Self {
        self.hazards.insert((row, col));
        self
    }

    pub fn with_hazards(mut self, positions: &[(usize, usize)]) -> Self {
        self.hazards.extend(positions.iter().copied());
        self
    }

    /// Replace physical adjacency with an explicit relation, for domains
    /// where "neighbor" is not spatial. Validated for symmetry at build.
    pub fn with_adjacency(mut self, map: HashMap<(usize, usize), Vec<(usize, usize)>>) -> Self {
        self.adjacency = Some(map);
        self
    }

    pub fn build(self) -> SwResult<Grid> {
        for &(r, c) in &self.hazards {
            if r >= self.rows || c >= self.cols {
                return Err(SweepError::Construction(format!(
                    "hazard ({}, {}) outside {}x{} grid",
                    r, c, self.rows, self.cols
                )));
            }
        }
        if let Some(map) = &self.adjacency {
            validate_adjacency(map, self.rows, self.cols)?;
        }

        let mut cells = Vec::with_capacity(self.rows * self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells.push(Cell::new(r, c, self.hazards.contains(&(r, c))));
            }
        }
        let mut grid = Grid::from_parts(self.rows, self.cols, cells, self.adjacency);
        populate_clues(&mut grid);

        for ((r, c), clue) in self.pre_revealed {
            if r >= self.rows || c >= self.cols {
                return Err(SweepError::Construction(format!(
                    "revealed cell ({}, {}) outside {}x{} grid",
                    r, c, self.rows, self.cols
                )));
            }
            let cell = grid.cell_mut(r, c);
            cell.state = CellState::Revealed;
            cell.clue = Some(clue);
        }

        info!(
            "grid built: {}x{}, {} hazards",
            grid.rows(),
            grid.cols(),
            grid.hazard_count()
        );
        Ok(grid)
    }

    /// Parse a token grid. Grammar (case-insensitive):
    /// `*` / `X` / `MINE` hazard, `.` / `HIDDEN` / empty concealed,
    /// digit 0-8 a pre-revealed cell carrying that clue.
    pub fn from_rows(rows: &[Vec<String>]) -> SwResult<Grid> {
        if rows.is_empty() {
            return GridBuilder::new(0, 0).build();
        }
        let cols = rows[0].len();
        let mut builder = GridBuilder::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SweepError::Construction(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            for (c, token) in row.iter().enumerate() {
                match parse_token(token)? {
                    Token::Hazard => {
                        builder.hazards.insert((r, c));
                    }
                    Token::Concealed => {}
                    Token::Revealed(clue) => {
                        builder.pre_revealed.push(((r, c), clue));
                    }
                }
            }
        }
        builder.build()
    }

    /// Load a token grid from a headerless CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> SwResult<Grid> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|t| t.to_string()).collect());
        }
        Self::from_rows(&rows)
    }
}

enum Token {
    Hazard,
    Concealed,
    Revealed(i8),
}

fn parse_token(token: &str) -> SwResult<Token> {
    let t = token.trim().to_ascii_uppercase();
    match t.as_str() {
        "*" | "X" | "MINE" => Ok(Token::Hazard),
        "." | "HIDDEN" | "" => Ok(Token::Concealed),
        _ => match t.parse::<i8>() {
            Ok(n) if (0..=8).contains(&n) => Ok(Token::Revealed(n)),
            _ => Err(SweepError::Construction(format!(
                "unrecognized cell token '{}'",
                token
            ))),
        },
    }
}

fn populate_clues(grid: &mut Grid) {
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.cell(r, c).hazard {
                grid.cell_mut(r, c).clue = Some(HAZARD_CLUE);
                continue;
            }
            let hazards = grid
                .neighbors(r, c)
                .iter()
                .filter(|&&(nr, nc)| grid.cell(nr, nc).hazard)
                .count();
            grid.cell_mut(r, c).clue = Some(hazards as i8);
        }
    }
}

fn validate_adjacency(
    map: &HashMap<(usize, usize), Vec<(usize, usize)>>,
    rows: usize,
    cols: usize,
) -> SwResult<()> {
    for (&(r, c), neighbors) in map {
        if r >= rows || c >= cols {
            return Err(SweepError::Construction(format!(
                "adjacency key ({}, {}) outside {}x{} grid",
                r, c, rows, cols
            )));
        }
        let mut seen = HashSet::new();
        for &(nr, nc) in neighbors {
            if nr >= rows || nc >= cols {
                return Err(SweepError::Construction(format!(
                    "adjacency target ({}, {}) outside {}x{} grid",
                    nr, nc, rows, cols
                )));
            }
            if !seen.insert((nr, nc)) {
                return Err(SweepError::Construction(format!(
                    "duplicate adjacency target ({}, {}) for ({}, {})",
                    nr, nc, r, c
                )));
            }
            let back = map.get(&(nr, nc)).map(|v| v.contains(&(r, c)));
            if back != Some(true) {
                return Err(SweepError::Construction(format!(
                    "adjacency is not symmetric: ({}, {}) -> ({}, {}) has no inverse",
                    r, c, nr, nc
                )));
            }
        }
    }
    Ok(())
}
