use gridsolve_core::{
    MonteCarloConfig, Phase, SolverError, action_value_rmse, optimal_action_values,
    policy_agreement, random_seed_pool, run_monte_carlo,
};
use gridsolve_mdp::{GridLayout, Position, RewardModel, TransitionTable};

fn medium() -> (TransitionTable, Position) {
    let layout = GridLayout::medium();
    let start = layout.start_position().expect("medium layout has a start");
    let table = TransitionTable::build(&layout.to_grid(), 0.8, &RewardModel::default());
    (table, start)
}

#[test]
fn public_run_replays_from_a_kept_pool() {
    let (table, start) = medium();
    let pool = random_seed_pool();
    let config = MonteCarloConfig {
        total_batches: 5,
        ..MonteCarloConfig::default()
    };

    let first = run_monte_carlo(&table, start, &config, &pool).expect("run should succeed");
    let second = run_monte_carlo(&table, start, &config, &pool).expect("run should succeed");

    assert_eq!(
        serde_json::to_string(&first.snapshots).expect("serialize"),
        serde_json::to_string(&second.snapshots).expect("serialize")
    );
    assert_eq!(first.snapshots.len(), 11);
    assert_eq!(first.snapshots[10].phase, Phase::Improvement);
}

#[test]
fn public_metrics_stay_in_range() {
    let (table, start) = medium();
    let config = MonteCarloConfig::default();
    let run = run_monte_carlo(&table, start, &config, &random_seed_pool())
        .expect("run should succeed");

    let optimal = optimal_action_values(&table, config.gamma);
    let rmse = action_value_rmse(&table, &run.action_values, &optimal);
    let agreement = policy_agreement(&table, &run.policy, &optimal);

    assert!(rmse.is_finite() && rmse >= 0.0);
    assert!((0.0..=100.0).contains(&agreement));
}

#[test]
fn public_guard_errors_display_their_bounds() {
    let (table, start) = medium();
    let err = run_monte_carlo(&table, start, &MonteCarloConfig::default(), &[1, 2, 3])
        .expect_err("tiny pool must fail");

    assert!(matches!(err, SolverError::SeedPoolTooSmall { available: 3, .. }));
    assert_eq!(
        err.to_string(),
        "seed pool holds 3 seeds but the run needs 1470"
    );
}
