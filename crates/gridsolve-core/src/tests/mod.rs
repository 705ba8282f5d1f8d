mod analysis_tests;
mod bellman_tests;
mod config_tests;
mod property_dp_tests;

use gridsolve_mdp::{GridLayout, Position, RewardModel, StateIndex, TransitionTable};

/// 1x3 corridor `[Floor, Floor, Goal]` with the given success probability.
pub(crate) fn corridor_table(success_prob: f64) -> TransitionTable {
    TransitionTable::build(
        &GridLayout::corridor(3).to_grid(),
        success_prob,
        &RewardModel::default(),
    )
}

pub(crate) fn medium_table() -> TransitionTable {
    TransitionTable::build(&GridLayout::medium().to_grid(), 0.8, &RewardModel::default())
}

pub(crate) fn index(table: &TransitionTable, row: usize, col: usize) -> StateIndex {
    table
        .index_of(Position::new(row, col))
        .expect("position should be in bounds")
}
