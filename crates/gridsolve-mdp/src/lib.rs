mod action;
mod error;
mod grid;
mod ids;
mod io;
mod layout;
mod reward;
mod session;
mod table;

#[cfg(test)]
mod tests;

pub use action::{ACTION_COUNT, Action};
pub use error::MdpError;
pub use grid::{CellType, Grid};
pub use ids::{Position, StateIndex};
pub use io::{grid_from_yaml, load_layout_yaml, save_layout_yaml};
pub use layout::GridLayout;
pub use reward::{DEFAULT_SUCCESS_PROB, RewardModel};
pub use session::{EpisodeState, EpisodeStatus, GridworldSession, LastMove};
pub use table::{OUTCOMES_PER_ACTION, TransitionTable};
