use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::trace;

use crate::{Action, CellType, Grid, MdpError, Position, RewardModel, TransitionTable};

/// Progress of an interactive episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Playing,
    ReachedGoal,
    ReachedTrap,
}

/// What the agent asked for versus where it actually went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastMove {
    pub intended: Action,
    pub actual: Action,
    pub slipped: bool,
}

/// Observable state of a [`GridworldSession`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeState {
    pub position: Position,
    pub steps: usize,
    pub cumulative_reward: f64,
    pub status: EpisodeStatus,
    pub trail: Vec<Position>,
    pub last_move: Option<LastMove>,
}

impl EpisodeState {
    fn at(start: Position) -> Self {
        EpisodeState {
            position: start,
            steps: 0,
            cumulative_reward: 0.0,
            status: EpisodeStatus::Playing,
            trail: vec![start],
            last_move: None,
        }
    }
}

/// A single agent walking a gridworld one move at a time.
///
/// Slips are sampled from a seeded ChaCha8 stream so a session replays
/// identically for the same seed and move sequence.
#[derive(Debug, Clone)]
pub struct GridworldSession {
    grid: Grid,
    start: Position,
    reward_model: RewardModel,
    table: TransitionTable,
    state: EpisodeState,
    rng: ChaCha8Rng,
}

impl GridworldSession {
    /// Start a session at `start`, which must be an in-bounds floor cell.
    pub fn new(
        grid: Grid,
        start: Position,
        success_prob: f64,
        reward_model: RewardModel,
        seed: u64,
    ) -> Result<Self, MdpError> {
        match grid.cell(start.row, start.col) {
            None => {
                return Err(MdpError::StartOutOfBounds {
                    row: start.row,
                    col: start.col,
                });
            }
            Some(CellType::Floor) => {}
            Some(_) => {
                return Err(MdpError::StartNotFloor {
                    row: start.row,
                    col: start.col,
                });
            }
        }

        let table = TransitionTable::build(&grid, success_prob, &reward_model);
        Ok(GridworldSession {
            grid,
            start,
            reward_model,
            table,
            state: EpisodeState::at(start),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    /// The transition table currently in effect.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Attempt `intended`, drawing the slip outcome from the session stream.
    pub fn step(&mut self, intended: Action) {
        let sample: f64 = self.rng.r#gen();
        self.step_with_sample(intended, sample);
    }

    /// Attempt `intended` with a caller-supplied uniform sample in `[0, 1)`.
    /// Moves after the episode has ended are ignored.
    pub fn step_with_sample(&mut self, intended: Action, sample: f64) {
        if self.state.status != EpisodeStatus::Playing {
            return;
        }

        let Some(current) = self.table.index_of(self.state.position) else {
            return;
        };
        let next = self.table.sample_next(current, intended, sample);
        let next_position = self.table.position(next);

        // A bounce-back has no direction of its own; report it as the intended move.
        let row_delta = next_position.row as isize - self.state.position.row as isize;
        let col_delta = next_position.col as isize - self.state.position.col as isize;
        let actual = Action::from_delta(row_delta, col_delta).unwrap_or(intended);

        self.state.last_move = Some(LastMove {
            intended,
            actual,
            slipped: actual != intended,
        });
        self.state.position = next_position;
        self.state.steps += 1;
        self.state.cumulative_reward += self.table.reward(next);
        self.state.trail.push(next_position);

        match self.table.cell_type(next) {
            CellType::Goal => self.state.status = EpisodeStatus::ReachedGoal,
            CellType::Trap => self.state.status = EpisodeStatus::ReachedTrap,
            CellType::Floor | CellType::Wall => {}
        }

        trace!(
            intended = %intended,
            actual = %actual,
            row = next_position.row,
            col = next_position.col,
            "session step"
        );
    }

    /// Return to the start cell with cleared statistics.
    pub fn reset(&mut self) {
        self.state = EpisodeState::at(self.start);
    }

    /// Set the slip probability, clamped to `[0, 1]`, and rebuild the table
    /// with `success_prob = 1 - slipperiness`. Returns the clamped value.
    pub fn set_slipperiness(&mut self, slipperiness: f64) -> f64 {
        let slipperiness = if slipperiness.is_nan() {
            0.0
        } else {
            slipperiness.clamp(0.0, 1.0)
        };
        self.table = TransitionTable::build(&self.grid, 1.0 - slipperiness, &self.reward_model);
        slipperiness
    }
}
