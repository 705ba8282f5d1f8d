use gridsolve_mdp::{Action, TransitionTable};
use tracing::{debug, trace};

use crate::{
    ActionValues, DpConfig, DpSolution, Phase, Policy, Snapshot,
    bellman::{
        expected_backup, greedy_policy_from_action_values, policy_value,
        state_values_under_policy,
    },
};

/// One synchronous sweep of `Q(s,a) = sum P(s'|s,a) (R(s') + gamma Q(s', pi(s')))`.
fn evaluation_sweep(
    table: &TransitionTable,
    policy: &Policy,
    current: &ActionValues,
    gamma: f64,
) -> (ActionValues, f64) {
    let mut next = ActionValues::empty(table);
    let mut delta: f64 = 0.0;

    for state in table.states() {
        if table.is_terminal(state) {
            next.set_all(state, table.reward(state));
            continue;
        }

        for action in Action::ALL {
            let value = expected_backup(table, state, action, gamma, |successor| {
                policy_value(table, successor, policy, current)
            });
            next.set(state, action, value);
            let old = current.get(state, action).unwrap_or(0.0);
            delta = delta.max((value - old).abs());
        }
    }

    (next, delta)
}

/// Policy iteration in action-value space.
///
/// Same control flow as [`policy_iteration_v`](crate::policy_iteration_v),
/// but evaluation keeps all four action values per state and improvement is
/// a plain argmax over them. Snapshot state values read `Q(s, pi(s))`.
pub fn policy_iteration_q(
    table: &TransitionTable,
    initial_policy: &Policy,
    initial_action_values: &ActionValues,
    config: &DpConfig,
) -> DpSolution {
    let mut policy = initial_policy.clone();
    let mut action_values = initial_action_values.clone();
    let mut state_values = state_values_under_policy(table, &policy, &action_values);
    let mut snapshots = vec![Snapshot::of_action_values(
        &action_values,
        &state_values,
        &policy,
        Phase::Evaluation,
        0.0,
    )];

    for outer in 0..config.max_outer_iterations {
        for sweep in 0..config.max_eval_sweeps {
            let (next, delta) = evaluation_sweep(table, &policy, &action_values, config.gamma);
            action_values = next;
            state_values = state_values_under_policy(table, &policy, &action_values);
            snapshots.push(Snapshot::of_action_values(
                &action_values,
                &state_values,
                &policy,
                Phase::Evaluation,
                delta,
            ));
            trace!(outer, sweep, delta, "q-space evaluation sweep");

            if delta < config.theta {
                break;
            }
        }

        let improved = greedy_policy_from_action_values(table, &action_values);
        let stable = improved == policy;
        policy = improved;
        state_values = state_values_under_policy(table, &policy, &action_values);
        snapshots.push(Snapshot::of_action_values(
            &action_values,
            &state_values,
            &policy,
            Phase::Improvement,
            0.0,
        ));
        debug!(outer, stable, "q-space policy improvement");

        if stable {
            break;
        }
    }

    DpSolution {
        snapshots,
        policy,
        state_values,
        action_values: Some(action_values),
    }
}
