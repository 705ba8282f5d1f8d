use gridsolve_mdp::{Action, TransitionTable};
use tracing::{debug, trace};

use crate::{
    ActionValues, DpConfig, DpSolution, Phase, Snapshot,
    bellman::{
        expected_backup, greedy_policy_from_action_values, max_action_value,
        state_values_from_max,
    },
};

/// Value iteration in action-value space.
///
/// Each sweep applies `Q(s,a) = sum P(s'|s,a) (R(s') + gamma max_a' Q(s',a'))`.
/// Snapshot state values are `max_a Q(s,a)` and the policy is the current
/// argmax, both purely informational.
pub fn value_iteration_q(
    table: &TransitionTable,
    initial_action_values: &ActionValues,
    config: &DpConfig,
) -> DpSolution {
    let mut action_values = initial_action_values.clone();
    let mut policy = greedy_policy_from_action_values(table, &action_values);
    let mut state_values = state_values_from_max(table, &action_values);
    let mut snapshots = vec![Snapshot::of_action_values(
        &action_values,
        &state_values,
        &policy,
        Phase::Evaluation,
        0.0,
    )];

    for sweep in 0..config.max_sweeps {
        let mut next = ActionValues::empty(table);
        let mut delta: f64 = 0.0;

        for state in table.states() {
            if table.is_terminal(state) {
                next.set_all(state, table.reward(state));
                continue;
            }

            for action in Action::ALL {
                let value = expected_backup(table, state, action, config.gamma, |successor| {
                    max_action_value(&action_values, successor)
                });
                next.set(state, action, value);
                let old = action_values.get(state, action).unwrap_or(0.0);
                delta = delta.max((value - old).abs());
            }
        }

        action_values = next;
        policy = greedy_policy_from_action_values(table, &action_values);
        state_values = state_values_from_max(table, &action_values);
        snapshots.push(Snapshot::of_action_values(
            &action_values,
            &state_values,
            &policy,
            Phase::Evaluation,
            delta,
        ));
        trace!(sweep, delta, "q-space value iteration sweep");

        if delta < config.theta {
            debug!(sweeps = sweep + 1, delta, "q-space value iteration converged");
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
