use gridsolve_mdp::{GridLayout, RewardModel, TransitionTable};
use proptest::prelude::*;

use crate::{DpConfig, StateValues, value_iteration_v};

fn layout_strategy() -> impl Strategy<Value = GridLayout> {
    (1usize..5, 1usize..5).prop_flat_map(|(rows, cols)| {
        let coord = (0i64..rows as i64, 0i64..cols as i64);
        (
            proptest::collection::vec(coord.clone(), 0..5),
            proptest::collection::vec(coord.clone(), 0..2),
            proptest::collection::vec(coord, 0..2),
        )
            .prop_map(move |(walls, goals, traps)| GridLayout {
                rows,
                cols,
                walls,
                goals,
                traps,
                agent_start: None,
            })
    })
}

proptest! {
    #[test]
    fn value_iteration_deltas_never_grow(layout in layout_strategy(), success_prob in 0.0f64..=1.0) {
        let table = TransitionTable::build(&layout.to_grid(), success_prob, &RewardModel::default());
        let solution = value_iteration_v(&table, &StateValues::zeros(&table), &DpConfig::default());

        let deltas: Vec<f64> = solution.snapshots.iter().skip(1).map(|s| s.delta).collect();
        for pair in deltas.windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1e-12, "delta grew from {} to {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn values_stay_within_reward_bounds(layout in layout_strategy(), success_prob in 0.0f64..=1.0) {
        let table = TransitionTable::build(&layout.to_grid(), success_prob, &RewardModel::default());
        let solution = value_iteration_v(&table, &StateValues::zeros(&table), &DpConfig::default());

        for (_, value) in solution.state_values.iter() {
            prop_assert!((-10.0..=10.0).contains(&value), "value {value} out of bounds");
        }
        prop_assert_eq!(solution.policy.len(), table.decision_states().count());
        prop_assert_eq!(solution.state_values.len(), table.states().count());
    }
}
