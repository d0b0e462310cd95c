// ===== sweepcore/src/consts.rs =====
/// Clue sentinel for cells that are themselves hazards.
/// A hazard has no meaningful neighbor count of its own.
pub const HAZARD_CLUE: i8 = -1;

/// Default weight of the local adjacency-risk signal.
pub const DEFAULT_LOCAL_WEIGHT: f64 = 1.0;

/// Default weight of the frontier-distance risk signal.
pub const DEFAULT_DISTANCE_WEIGHT: f64 = 0.8;

/// Ceiling for estimated hazard probability. Certainty (1.0) is reserved
/// for cells that are actually flagged, never for an estimate.
pub const DEFAULT_RISK_CAP: f64 = 0.95;

/// Decision threshold used when the confidence tracker has none set.
pub const DEFAULT_TAU: f64 = 0.5;

/// Consecutive blind-guess turns tolerated before the policy aborts.
pub const DEFAULT_STALL_LIMIT: usize = 10;

/// Default cap on reveals per policy run.
pub const DEFAULT_MOVE_BUDGET: usize = 10_000;
