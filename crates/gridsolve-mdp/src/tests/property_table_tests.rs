use proptest::prelude::*;

use crate::{Action, CellType, GridLayout, RewardModel, TransitionTable};

fn layout_strategy() -> impl Strategy<Value = GridLayout> {
    (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
        let coord = (-1i64..(rows as i64 + 1), -1i64..(cols as i64 + 1));
        (
            proptest::collection::vec(coord.clone(), 0..8),
            proptest::collection::vec(coord.clone(), 0..3),
            proptest::collection::vec(coord, 0..3),
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
    fn probabilities_are_conserved(success_prob in 0.0f64..=1.0) {
        let table = TransitionTable::build(
            &GridLayout::new(2, 2).to_grid(),
            success_prob,
            &RewardModel::default(),
        );
        prop_assert!((table.success_prob() + 2.0 * table.perp_prob() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn outcomes_stay_on_passable_cells(layout in layout_strategy(), success_prob in 0.0f64..=1.0) {
        let table = TransitionTable::build(&layout.to_grid(), success_prob, &RewardModel::default());

        for state in table.states() {
            for action in Action::ALL {
                for next in table.next_states(state, action) {
                    prop_assert!(next.index() < table.state_count());
                    prop_assert!(!table.is_wall(next));
                }
            }
        }
    }

    #[test]
    fn terminal_cells_absorb(layout in layout_strategy()) {
        let rewards = RewardModel::default();
        let table = TransitionTable::build(&layout.to_grid(), 0.8, &rewards);

        for state in table.states() {
            let cell = table.cell_type(state);
            prop_assert_eq!(table.is_terminal(state), cell.is_terminal());

            match cell {
                CellType::Goal => prop_assert_eq!(table.reward(state), rewards.goal),
                CellType::Trap => prop_assert_eq!(table.reward(state), rewards.trap),
                CellType::Floor => prop_assert_eq!(table.reward(state), rewards.step),
                CellType::Wall => unreachable!("states() skips walls"),
            }

            if cell.is_terminal() {
                for action in Action::ALL {
                    prop_assert_eq!(table.next_states(state, action), [state; 3]);
                }
            }
        }
    }
}
