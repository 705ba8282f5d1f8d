use gridsolve_mdp::{Action, TransitionTable};
use tracing::{debug, trace};

use crate::{
    DpConfig, DpSolution, Phase, Snapshot, StateValues,
    bellman::{greedy_policy_from_values, state_backup},
};

/// Value iteration in state-value space.
///
/// Each sweep applies `V(s) = max_a sum P(s'|s,a) (R(s') + gamma V(s'))` and
/// reports the policy that is greedy for the new values. There is no separate
/// improvement phase, so every snapshot is tagged [`Phase::Evaluation`].
pub fn value_iteration_v(
    table: &TransitionTable,
    initial_values: &StateValues,
    config: &DpConfig,
) -> DpSolution {
    let mut values = initial_values.clone();
    let mut policy = greedy_policy_from_values(table, &values, config.gamma);
    let mut snapshots = vec![Snapshot::of_values(&values, &policy, Phase::Evaluation, 0.0)];

    for sweep in 0..config.max_sweeps {
        let mut next = StateValues::empty(table);
        let mut delta: f64 = 0.0;

        for state in table.states() {
            if table.is_terminal(state) {
                next.set(state, table.reward(state));
                continue;
            }

            let best = Action::ALL
                .into_iter()
                .map(|action| state_backup(table, state, action, &values, config.gamma))
                .fold(f64::NEG_INFINITY, f64::max);
            next.set(state, best);
            delta = delta.max((best - values.value_or_zero(state)).abs());
        }

        values = next;
        policy = greedy_policy_from_values(table, &values, config.gamma);
        snapshots.push(Snapshot::of_values(&values, &policy, Phase::Evaluation, delta));
        trace!(sweep, delta, "value iteration sweep");

        if delta < config.theta {
            debug!(sweeps = sweep + 1, delta, "value iteration converged");
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
