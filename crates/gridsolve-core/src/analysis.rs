//! Quality metrics comparing a learned run against the optimal solution.

use gridsolve_mdp::{Action, CellType, TransitionTable};
use serde::Serialize;

use crate::{ActionValues, DpConfig, McSnapshot, Policy, value_iteration_q};

/// Two action values closer than this count as tied for optimal.
pub const OPTIMALITY_TOLERANCE: f64 = 1e-9;
/// Convergence threshold of the baseline solve.
const BASELINE_THETA: f64 = 1e-8;
const BASELINE_MAX_SWEEPS: usize = 10_000;

/// Optimal action values from Q-space value iteration started at zero.
pub fn optimal_action_values(table: &TransitionTable, gamma: f64) -> ActionValues {
    let config = DpConfig {
        gamma,
        theta: BASELINE_THETA,
        max_sweeps: BASELINE_MAX_SWEEPS,
        ..DpConfig::default()
    };
    let solution = value_iteration_q(table, &ActionValues::zeros(table), &config);
    solution
        .action_values
        .unwrap_or_else(|| ActionValues::zeros(table))
}

/// Root-mean-square error over every action of the decision states defined
/// in both `action_values` and `optimal`. Zero when nothing is comparable.
pub fn action_value_rmse(
    table: &TransitionTable,
    action_values: &ActionValues,
    optimal: &ActionValues,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0_usize;

    for state in table.decision_states() {
        let (Some(learned), Some(best)) = (action_values.row(state), optimal.row(state)) else {
            continue;
        };
        for (learned, best) in learned.iter().zip(best) {
            sum += (learned - best).powi(2);
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        (sum / count as f64).sqrt()
    }
}

/// Percentage of floor states whose `policy` action is optimal under
/// `optimal`, ties within [`OPTIMALITY_TOLERANCE`] included.
pub fn policy_agreement(table: &TransitionTable, policy: &Policy, optimal: &ActionValues) -> f64 {
    let mut agree = 0_usize;
    let mut total = 0_usize;

    for state in table.states() {
        if table.cell_type(state) != CellType::Floor {
            continue;
        }
        let (Some(action), Some(row)) = (policy.get(state), optimal.row(state)) else {
            continue;
        };

        let best = Action::ALL
            .into_iter()
            .map(|candidate| row[candidate.index()])
            .fold(f64::NEG_INFINITY, f64::max);
        total += 1;
        if (row[action.index()] - best).abs() <= OPTIMALITY_TOLERANCE {
            agree += 1;
        }
    }

    if total == 0 {
        0.0
    } else {
        agree as f64 / total as f64 * 100.0
    }
}

/// Bounds of the cell values shown across a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Min and max of `max_a Q(s, a)` over every cell of every snapshot.
/// `None` when the snapshots carry no values.
pub fn value_range(snapshots: &[McSnapshot]) -> Option<ValueRange> {
    let mut range: Option<ValueRange> = None;

    for snapshot in snapshots {
        for (_, row) in snapshot.action_values.iter() {
            let value = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            range = Some(match range {
                Some(ValueRange { min, max }) => ValueRange {
                    min: min.min(value),
                    max: max.max(value),
                },
                None => ValueRange {
                    min: value,
                    max: value,
                },
            });
        }
    }

    range
}
