//! Backup arithmetic and greedy-policy derivation shared by every solver.
//!
//! Rewards are attributed to the destination of a transition: landing in
//! `s'` pays `R(s')`. Landing in a terminal state ends the episode, so its
//! continuation is zero and the landing is worth exactly its reward.

use gridsolve_mdp::{Action, StateIndex, TransitionTable};

use crate::{ActionValues, Policy, StateValues};

/// Worth of landing in `next` given the continuation value estimated there.
pub fn landing_value(table: &TransitionTable, next: StateIndex, continuation: f64, gamma: f64) -> f64 {
    let reward = table.reward(next);
    if table.is_terminal(next) {
        reward
    } else {
        reward + gamma * continuation
    }
}

/// Expected one-step lookahead of `(state, action)` with `continuation`
/// supplying the value estimate at each successor.
pub fn expected_backup<F>(
    table: &TransitionTable,
    state: StateIndex,
    action: Action,
    gamma: f64,
    mut continuation: F,
) -> f64
where
    F: FnMut(StateIndex) -> f64,
{
    let mut value = 0.0;
    for (next, probability) in table.outcomes(state, action) {
        value += probability * landing_value(table, next, continuation(next), gamma);
    }
    value
}

/// `sum P(s'|s,a) * (R(s') + gamma * V(s'))` against state values.
pub fn state_backup(
    table: &TransitionTable,
    state: StateIndex,
    action: Action,
    values: &StateValues,
    gamma: f64,
) -> f64 {
    expected_backup(table, state, action, gamma, |next| values.value_or_zero(next))
}

/// Pick the best action by `score`, keeping the first of any tie in
/// [`Action::ALL`] order. Falls back to `Up` when no score beats `-inf`.
pub fn argmax_action<F>(mut score: F) -> (Action, f64)
where
    F: FnMut(Action) -> f64,
{
    let mut best = (Action::Up, f64::NEG_INFINITY);
    for action in Action::ALL {
        let value = score(action);
        if value > best.1 {
            best = (action, value);
        }
    }
    best
}

/// Value of following `policy` from `state`, read from the action values.
/// States without a policy action (terminals included) read as their reward.
pub fn policy_value(
    table: &TransitionTable,
    state: StateIndex,
    policy: &Policy,
    action_values: &ActionValues,
) -> f64 {
    match policy.get(state) {
        Some(action) => action_values
            .get(state, action)
            .unwrap_or_else(|| table.reward(state)),
        None => table.reward(state),
    }
}

/// Largest action value of `state`, or zero when none is defined.
pub fn max_action_value(action_values: &ActionValues, state: StateIndex) -> f64 {
    let Some(row) = action_values.row(state) else {
        return 0.0;
    };
    let best = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if best.is_finite() { best } else { 0.0 }
}

/// Greedy policy from a one-step lookahead over state values.
pub fn greedy_policy_from_values(table: &TransitionTable, values: &StateValues, gamma: f64) -> Policy {
    let mut policy = Policy::empty(table);
    for state in table.decision_states() {
        let (action, _) = argmax_action(|action| state_backup(table, state, action, values, gamma));
        policy.set(state, action);
    }
    policy
}

/// Greedy policy reading action values directly. Missing entries never win.
pub fn greedy_policy_from_action_values(table: &TransitionTable, action_values: &ActionValues) -> Policy {
    let mut policy = Policy::empty(table);
    for state in table.decision_states() {
        let (action, _) = argmax_action(|action| {
            action_values
                .get(state, action)
                .unwrap_or(f64::NEG_INFINITY)
        });
        policy.set(state, action);
    }
    policy
}

/// State values for display under a fixed policy: `Q(s, pi(s))`, with
/// terminals pinned to their reward.
pub fn state_values_under_policy(
    table: &TransitionTable,
    policy: &Policy,
    action_values: &ActionValues,
) -> StateValues {
    let mut values = StateValues::empty(table);
    for state in table.states() {
        let value = if table.is_terminal(state) {
            table.reward(state)
        } else {
            policy_value(table, state, policy, action_values)
        };
        values.set(state, value);
    }
    values
}

/// State values for display under the greedy policy: `max_a Q(s, a)`, with
/// terminals pinned to their reward.
pub fn state_values_from_max(table: &TransitionTable, action_values: &ActionValues) -> StateValues {
    let mut values = StateValues::empty(table);
    for state in table.states() {
        let value = if table.is_terminal(state) {
            table.reward(state)
        } else {
            max_action_value(action_values, state)
        };
        values.set(state, value);
    }
    values
}
