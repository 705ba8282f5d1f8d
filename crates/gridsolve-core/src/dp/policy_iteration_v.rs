use gridsolve_mdp::TransitionTable;
use tracing::{debug, trace};

use crate::{
    DpConfig, DpSolution, Phase, Policy, Snapshot, StateValues,
    bellman::{greedy_policy_from_values, state_backup},
};

/// One synchronous evaluation sweep of `policy`.
///
/// Terminals are pinned to their reward; decision states without an action
/// read as zero. Neither contributes to `delta`.
fn evaluation_sweep(
    table: &TransitionTable,
    policy: &Policy,
    current: &StateValues,
    gamma: f64,
) -> (StateValues, f64) {
    let mut next = StateValues::empty(table);
    let mut delta: f64 = 0.0;

    for state in table.states() {
        if table.is_terminal(state) {
            next.set(state, table.reward(state));
            continue;
        }

        let Some(action) = policy.get(state) else {
            next.set(state, 0.0);
            continue;
        };

        let value = state_backup(table, state, action, current, gamma);
        next.set(state, value);
        delta = delta.max((value - current.value_or_zero(state)).abs());
    }

    (next, delta)
}

/// Policy iteration in state-value space.
///
/// Alternates evaluation sweeps (until `delta < theta` or the sweep cap) with
/// a greedy improvement step, until the policy stops changing or the outer
/// cap is hit. Snapshots: the initial state, one per sweep, one per
/// improvement.
pub fn policy_iteration_v(
    table: &TransitionTable,
    initial_policy: &Policy,
    initial_values: &StateValues,
    config: &DpConfig,
) -> DpSolution {
    let mut policy = initial_policy.clone();
    let mut values = initial_values.clone();
    let mut snapshots = vec![Snapshot::of_values(&values, &policy, Phase::Evaluation, 0.0)];

    for outer in 0..config.max_outer_iterations {
        for sweep in 0..config.max_eval_sweeps {
            let (next, delta) = evaluation_sweep(table, &policy, &values, config.gamma);
            values = next;
            snapshots.push(Snapshot::of_values(&values, &policy, Phase::Evaluation, delta));
            trace!(outer, sweep, delta, "policy evaluation sweep");

            if delta < config.theta {
                break;
            }
        }

        let improved = greedy_policy_from_values(table, &values, config.gamma);
        let stable = improved == policy;
        policy = improved;
        snapshots.push(Snapshot::of_values(&values, &policy, Phase::Improvement, 0.0));
        debug!(outer, stable, "policy improvement");

        if stable {
            break;
        }
    }

    DpSolution {
        snapshots,
        policy,
        state_values: values,
        action_values: None,
    }
}
