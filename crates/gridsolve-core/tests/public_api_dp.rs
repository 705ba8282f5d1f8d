use gridsolve_core::{
    ActionValues, DpConfig, Phase, Policy, StateValues, policy_iteration_v, value_iteration_q,
};
use gridsolve_mdp::{Action, CellType, Grid, RewardModel, TransitionTable};

fn corridor() -> TransitionTable {
    let grid = Grid::from_rows(vec![vec![CellType::Floor, CellType::Floor, CellType::Goal]]);
    let rewards = RewardModel {
        goal: 10.0,
        trap: -10.0,
        step: -0.1,
    };
    TransitionTable::build(&grid, 1.0, &rewards)
}

#[test]
fn public_corridor_converges_to_right_right() {
    let table = corridor();
    let solution = policy_iteration_v(
        &table,
        &Policy::randomized(&table),
        &StateValues::randomized(&table),
        &DpConfig::new(0.9, 0.01),
    );

    assert_eq!(solution.policy.get_key("0,0"), Some(Action::Right));
    assert_eq!(solution.policy.get_key("0,1"), Some(Action::Right));
    assert_eq!(solution.state_values.get_key("0,1"), Some(10.0));
    assert_eq!(solution.policy.get_key("0,2"), None);
}

#[test]
fn public_keyed_views_cover_non_wall_cells() {
    let table = corridor();
    let solution = value_iteration_q(&table, &ActionValues::zeros(&table), &DpConfig::default());

    let keyed = solution.state_values.to_keyed();
    assert_eq!(
        keyed.keys().cloned().collect::<Vec<_>>(),
        vec!["0,0".to_string(), "0,1".to_string(), "0,2".to_string()]
    );

    let action_values = solution.action_values.expect("q-space run keeps action values");
    assert_eq!(action_values.get_key("0,2", Action::Left), Some(10.0));
    assert!(solution.snapshots.iter().all(|s| s.phase == Phase::Evaluation));
}
