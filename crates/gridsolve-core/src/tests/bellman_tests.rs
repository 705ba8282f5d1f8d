use float_eq::assert_float_eq;
use gridsolve_mdp::Action;

use super::{corridor_table, index};
use crate::{
    ActionValues, Policy, StateValues,
    bellman::{
        argmax_action, greedy_policy_from_action_values, greedy_policy_from_values,
        landing_value, max_action_value, state_backup, state_values_from_max,
    },
};

#[test]
fn landing_in_terminal_pays_only_its_reward() {
    let table = corridor_table(1.0);
    let goal = index(&table, 0, 2);
    let floor = index(&table, 0, 1);

    assert_float_eq!(landing_value(&table, goal, 123.0, 0.9), 10.0, abs <= 1e-12);
    assert_float_eq!(landing_value(&table, floor, 5.0, 0.9), -0.1 + 4.5, abs <= 1e-12);
}

#[test]
fn state_backup_weights_outcomes_by_probability() {
    let table = corridor_table(0.8);
    let values = StateValues::zeros(&table);
    let middle = index(&table, 0, 1);

    // Right: 0.8 lands on the goal, both slips bounce back to the floor cell.
    let expected = 0.8 * 10.0 + 0.2 * -0.1;
    assert_float_eq!(
        state_backup(&table, middle, Action::Right, &values, 0.9),
        expected,
        abs <= 1e-12
    );
}

#[test]
fn argmax_keeps_first_action_on_ties() {
    let (action, value) = argmax_action(|_| 1.0);
    assert_eq!(action, Action::Up);
    assert_float_eq!(value, 1.0, abs <= 0.0);

    let (action, _) = argmax_action(|action| match action {
        Action::Left | Action::Right => 2.0,
        _ => 0.0,
    });
    assert_eq!(action, Action::Left);
}

#[test]
fn argmax_falls_back_to_up_when_nothing_scores() {
    let (action, value) = argmax_action(|_| f64::NEG_INFINITY);
    assert_eq!(action, Action::Up);
    assert!(value.is_infinite());
}

#[test]
fn greedy_policies_cover_only_decision_states() {
    let table = corridor_table(1.0);
    let values = StateValues::zeros(&table);
    let policy = greedy_policy_from_values(&table, &values, 0.9);

    assert_eq!(policy.len(), 2);
    assert_eq!(policy.get(index(&table, 0, 2)), None);
    assert_eq!(policy.get(index(&table, 0, 1)), Some(Action::Right));
}

#[test]
fn greedy_policy_from_action_values_ignores_missing_rows() {
    let table = corridor_table(1.0);
    let mut action_values = ActionValues::empty(&table);
    action_values.set(index(&table, 0, 0), Action::Down, 1.0);

    let policy = greedy_policy_from_action_values(&table, &action_values);
    assert_eq!(policy.get(index(&table, 0, 0)), Some(Action::Down));
    // No row for (0,1): nothing beats -inf, so the fallback applies.
    assert_eq!(policy.get(index(&table, 0, 1)), Some(Action::Up));
    assert_ne!(policy, Policy::empty(&table));
}

#[test]
fn max_values_pin_terminals_to_reward() {
    let table = corridor_table(1.0);
    let mut action_values = ActionValues::zeros(&table);
    action_values.set(index(&table, 0, 0), Action::Left, -3.0);
    action_values.set(index(&table, 0, 0), Action::Right, 4.0);

    let values = state_values_from_max(&table, &action_values);
    assert_float_eq!(values.value_or_zero(index(&table, 0, 0)), 4.0, abs <= 0.0);
    assert_float_eq!(values.value_or_zero(index(&table, 0, 2)), 10.0, abs <= 0.0);
    assert_float_eq!(
        max_action_value(&ActionValues::empty(&table), index(&table, 0, 0)),
        0.0,
        abs <= 0.0
    );
}
