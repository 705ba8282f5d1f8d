use float_eq::assert_float_eq;
use gridsolve_mdp::{Action, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{corridor_table, index, medium_table};
use crate::{
    ActionValues, MonteCarloConfig, Policy, action_value_rmse, optimal_action_values,
    policy_agreement, run_monte_carlo, seed_pool_from, value_range,
    bellman::greedy_policy_from_action_values,
};

#[test]
fn optimal_corridor_values_match_closed_form() {
    let table = corridor_table(1.0);
    let optimal = optimal_action_values(&table, 0.9);

    assert_eq!(optimal.get(index(&table, 0, 1), Action::Right), Some(10.0));
    assert_float_eq!(
        optimal
            .get(index(&table, 0, 0), Action::Right)
            .expect("row should exist"),
        8.9,
        abs <= 1e-9
    );
}

#[test]
fn rmse_is_zero_against_itself_and_grows_with_error() {
    let table = corridor_table(1.0);
    let optimal = optimal_action_values(&table, 0.9);
    assert_float_eq!(action_value_rmse(&table, &optimal, &optimal), 0.0, abs <= 0.0);

    let mut shifted = optimal.clone();
    for state in table.decision_states() {
        for action in Action::ALL {
            let value = shifted.get(state, action).expect("row should exist");
            shifted.set(state, action, value + 2.0);
        }
    }
    assert_float_eq!(action_value_rmse(&table, &shifted, &optimal), 2.0, abs <= 1e-12);

    let empty = ActionValues::empty(&table);
    assert_float_eq!(action_value_rmse(&table, &empty, &optimal), 0.0, abs <= 0.0);
}

#[test]
fn greedy_optimal_policy_agrees_fully() {
    let table = medium_table();
    let optimal = optimal_action_values(&table, 0.9);
    let greedy = greedy_policy_from_action_values(&table, &optimal);

    assert_float_eq!(policy_agreement(&table, &greedy, &optimal), 100.0, abs <= 1e-12);
}

#[test]
fn policy_agreement_counts_suboptimal_states() {
    let table = corridor_table(1.0);
    let optimal = optimal_action_values(&table, 0.9);

    let wrong = Policy::uniform(&table, Action::Left);
    assert_float_eq!(policy_agreement(&table, &wrong, &optimal), 0.0, abs <= 0.0);

    let mut half = Policy::uniform(&table, Action::Left);
    half.set(index(&table, 0, 1), Action::Right);
    assert_float_eq!(policy_agreement(&table, &half, &optimal), 50.0, abs <= 1e-12);

    assert_float_eq!(
        policy_agreement(&table, &Policy::empty(&table), &optimal),
        0.0,
        abs <= 0.0
    );
}

#[test]
fn value_range_spans_run_snapshots() {
    assert_eq!(value_range(&[]), None);

    let table = medium_table();
    let config = MonteCarloConfig {
        episodes_per_batch: 5,
        total_batches: 3,
        ..MonteCarloConfig::default()
    };
    let pool = seed_pool_from(&mut ChaCha8Rng::seed_from_u64(31));
    let run = run_monte_carlo(&table, Position::new(0, 0), &config, &pool)
        .expect("run should succeed");

    let range = value_range(&run.snapshots).expect("snapshots carry values");
    assert!(range.min <= range.max);
    // Goal and trap rows are pinned, and every learned value lies between them.
    assert_float_eq!(range.max, 10.0, abs <= 0.0);
    assert!(range.min >= -10.0);
}
