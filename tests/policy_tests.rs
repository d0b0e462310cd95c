use sweepcore::board::{CellState, Grid, GridBuilder};
use sweepcore::config::PolicyParams;
use sweepcore::policy::{Action, DecisionPolicy, Outcome};
use sweepcore::risk::{RiskEstimator, RiskMap};

fn apply(grid: &mut Grid, action: Action) {
    match action {
        Action::Reveal { row, col } => grid.reveal(row, col, true).unwrap(),
        Action::Flag { row, col } => grid.flag(row, col).unwrap(),
    }
}

#[test]
fn solves_zero_hazard_grid() {
    let mut grid = GridBuilder::new(4, 4).build().unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams::default());
    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::Solved);
    assert!(grid.is_solved());
}

#[test]
fn solves_deducible_board_without_collapse() {
    let mut grid = GridBuilder::new(3, 3).hazard_at(0, 1).build().unwrap();
    grid.reveal(2, 0, true).unwrap();

    let mut policy = DecisionPolicy::new(PolicyParams::default());
    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::Solved);
    assert_eq!(grid.cell(0, 1).state(), CellState::Flagged);
}

#[test]
fn forced_guess_can_collapse() {
    // Two hazards diagonal to the safe corner; after the first reveal no
    // deduction applies and the minimum-risk fallback steps on a hazard.
    let mut grid = GridBuilder::new(2, 2)
        .with_hazards(&[(0, 1), (1, 0)])
        .build()
        .unwrap();
    grid.reveal(0, 0, false).unwrap();

    let mut policy = DecisionPolicy::new(PolicyParams::default());
    let outcome = policy.run(&mut grid).unwrap();
    assert_eq!(outcome, Outcome::Collapsed { row: 0, col: 1 });
}

#[test]
fn zero_budget_reports_exhaustion() {
    let mut grid = GridBuilder::new(3, 3).hazard_at(1, 1).build().unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams {
        move_budget: 0,
        ..Default::default()
    });
    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::BudgetExhausted);
}

#[test]
fn next_action_only_targets_concealed_cells() {
    let mut grid = GridBuilder::new(4, 4)
        .with_hazards(&[(0, 3), (3, 0)])
        .build()
        .unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams::default());

    for _ in 0..32 {
        let Some(action) = policy.next_action(&mut grid).unwrap() else {
            break;
        };
        let Action::Reveal { row, col } = action else {
            panic!("policy only emits reveals");
        };
        assert_eq!(grid.cell(row, col).state(), CellState::Concealed);
        apply(&mut grid, action);
        let hazard = grid.cell(row, col).is_hazard();
        policy
            .record_outcome(grid.cell(row, col).confidence(), hazard)
            .unwrap();
        if hazard {
            break;
        }
    }
}

#[test]
fn next_action_surfaces_predicted_risk() {
    // Fully concealed 3x3 with one hazard: every estimate is the base
    // rate 1/9, and the chosen cell must carry it for feedback.
    let mut grid = GridBuilder::new(3, 3).hazard_at(2, 2).build().unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams::default());

    let Some(Action::Reveal { row, col }) = policy.next_action(&mut grid).unwrap() else {
        panic!("expected a reveal");
    };
    assert!((grid.cell(row, col).confidence() - 1.0 / 9.0).abs() < 1e-12);
}

#[test]
fn stalls_instead_of_blind_guessing() {
    // Three hazards out of four cells: no deduction applies and every
    // estimate exceeds the threshold, so the first turn is a blind guess.
    let mut grid = GridBuilder::new(2, 2)
        .with_hazards(&[(0, 1), (1, 0), (1, 1)])
        .build()
        .unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams {
        stall_limit: 1,
        ..Default::default()
    });

    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::Stalled);
    // The stall fires before the guess is applied.
    assert_eq!(grid.revealed_count(), 0);
}

#[test]
fn stall_counter_spans_consecutive_guesses() {
    // Six hazards around three isolated safe cells: the first guess lands
    // on (0, 0) but yields no deduction, and the second turn is another
    // blind guess that trips the limit.
    let mut grid = GridBuilder::new(3, 3)
        .with_hazards(&[(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)])
        .build()
        .unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams {
        stall_limit: 2,
        ..Default::default()
    });

    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::Stalled);
    assert_eq!(grid.revealed_count(), 1);
    assert_eq!(grid.cell(0, 0).state(), CellState::Revealed);
}

/// Estimator that deliberately reports stale coordinates and nothing else.
struct StaleEstimator;

impl RiskEstimator for StaleEstimator {
    fn estimate(&self, grid: &Grid) -> RiskMap {
        let mut map = RiskMap::new();
        for cell in grid.cells() {
            if cell.state() != CellState::Concealed {
                map.insert((cell.row(), cell.col()), 0.01);
            }
        }
        map
    }
}

#[test]
fn stale_estimator_entries_are_never_selected() {
    let mut grid = GridBuilder::new(2, 2).hazard_at(1, 1).build().unwrap();
    grid.reveal(0, 0, false).unwrap();

    let mut policy =
        DecisionPolicy::new(PolicyParams::default()).with_estimator(Box::new(StaleEstimator));
    // The only entries point at the revealed cell, so there is no move.
    assert_eq!(policy.run(&mut grid).unwrap(), Outcome::NoMove);
}

#[test]
fn fixed_seed_reproduces_action_sequence() {
    let base = GridBuilder::new(4, 4)
        .with_hazards(&[(1, 1), (2, 3)])
        .build()
        .unwrap();

    let squeeze = |seed: u64| -> Vec<Action> {
        let mut grid = base.clone();
        let mut policy = DecisionPolicy::new(PolicyParams::default()).with_seed(seed);
        let mut actions = Vec::new();
        for _ in 0..64 {
            let Some(action) = policy.next_action(&mut grid).unwrap() else {
                break;
            };
            actions.push(action);
            apply(&mut grid, action);
            let Action::Reveal { row, col } = action else {
                continue;
            };
            if grid.cell(row, col).is_hazard() {
                break;
            }
        }
        actions
    };

    assert_eq!(squeeze(42), squeeze(42));
}

#[test]
fn lower_threshold_still_yields_fallback_move() {
    let mut grid = GridBuilder::new(2, 3)
        .with_hazards(&[(0, 0), (1, 2)])
        .build()
        .unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams::default());
    // Threshold below every estimate: the global-minimum fallback applies.
    policy.confidence_mut().set_threshold(0.0).unwrap();
    let action = policy.next_action(&mut grid).unwrap();
    assert!(action.is_some());
}

#[test]
fn tie_break_prefers_lowest_coordinates_unseeded() {
    // Fully concealed, uniform risk: the first move must be (0, 0).
    let mut grid = GridBuilder::new(3, 3).hazard_at(2, 2).build().unwrap();
    let mut policy = DecisionPolicy::new(PolicyParams::default());
    let action = policy.next_action(&mut grid).unwrap();
    assert_eq!(action, Some(Action::Reveal { row: 0, col: 0 }));
}
