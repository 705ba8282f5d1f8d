use crate::{ACTION_COUNT, Action, CellType, Grid, Position, RewardModel, StateIndex};

/// Candidate next states per `(state, action)`: intended move, then the two slips.
pub const OUTCOMES_PER_ACTION: usize = 3;

/// Flat, index-addressed transition model compiled from a grid.
///
/// Every non-wall cell gets a reward and terminal flag, and for each action
/// three candidate destinations `(primary, perp1, perp2)` with probabilities
/// `(success_prob, perp_prob, perp_prob)`. Moves that leave the grid or hit a
/// wall bounce back to the source cell. Terminal cells are absorbing: all
/// three outcomes point back at themselves.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    rows: usize,
    cols: usize,
    cells: Vec<CellType>,
    terminal: Vec<bool>,
    rewards: Vec<f64>,
    transitions: Vec<[StateIndex; OUTCOMES_PER_ACTION]>,
    success_prob: f64,
    perp_prob: f64,
}

impl TransitionTable {
    /// Compile `grid` with the given success probability and reward model.
    pub fn build(grid: &Grid, success_prob: f64, reward_model: &RewardModel) -> Self {
        let rows = grid.rows();
        let cols = grid.cols();
        let cells = grid.cells().to_vec();
        let size = cells.len();

        let mut terminal = vec![false; size];
        let mut rewards = vec![0.0; size];
        for (index, cell) in cells.iter().enumerate() {
            match cell {
                CellType::Wall => {}
                CellType::Goal => {
                    terminal[index] = true;
                    rewards[index] = reward_model.goal;
                }
                CellType::Trap => {
                    terminal[index] = true;
                    rewards[index] = reward_model.trap;
                }
                CellType::Floor => rewards[index] = reward_model.step,
            }
        }

        let passable = |row: isize, col: isize| -> Option<StateIndex> {
            if row < 0 || col < 0 {
                return None;
            }
            let index = grid.index_of(Position::new(row as usize, col as usize))?;
            (!cells[index.index()].is_wall()).then_some(index)
        };

        let mut transitions = Vec::with_capacity(size * ACTION_COUNT);
        for (index, cell) in cells.iter().enumerate() {
            let source = StateIndex::from(index);
            let position = grid.position_of(source);

            for action in Action::ALL {
                if cell.is_wall() || cell.is_terminal() {
                    transitions.push([source; OUTCOMES_PER_ACTION]);
                    continue;
                }

                let resolve = |direction: Action| {
                    let (dr, dc) = direction.delta();
                    passable(position.row as isize + dr, position.col as isize + dc)
                        .unwrap_or(source)
                };
                let [perp1, perp2] = action.perpendicular();
                transitions.push([resolve(action), resolve(perp1), resolve(perp2)]);
            }
        }

        TransitionTable {
            rows,
            cols,
            cells,
            terminal,
            rewards,
            transitions,
            success_prob,
            perp_prob: (1.0 - success_prob) / 2.0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, walls included.
    pub fn state_count(&self) -> usize {
        self.cells.len()
    }

    pub fn success_prob(&self) -> f64 {
        self.success_prob
    }

    pub fn perp_prob(&self) -> f64 {
        self.perp_prob
    }

    /// Cell type at `state`; unknown indices read as walls.
    pub fn cell_type(&self, state: StateIndex) -> CellType {
        self.cells
            .get(state.index())
            .copied()
            .unwrap_or(CellType::Wall)
    }

    pub fn is_terminal(&self, state: StateIndex) -> bool {
        self.terminal.get(state.index()).copied().unwrap_or(false)
    }

    pub fn is_wall(&self, state: StateIndex) -> bool {
        self.cell_type(state).is_wall()
    }

    /// Reward for landing in `state`; walls and unknown indices carry none.
    pub fn reward(&self, state: StateIndex) -> f64 {
        self.rewards.get(state.index()).copied().unwrap_or(0.0)
    }

    /// The three candidate destinations of `(state, action)`.
    /// Unknown indices resolve to a self-loop.
    pub fn next_states(&self, state: StateIndex, action: Action) -> [StateIndex; OUTCOMES_PER_ACTION] {
        self.transitions
            .get(state.index() * ACTION_COUNT + action.index())
            .copied()
            .unwrap_or([state; OUTCOMES_PER_ACTION])
    }

    /// `(next_state, probability)` pairs for `(state, action)`.
    pub fn outcomes(
        &self,
        state: StateIndex,
        action: Action,
    ) -> [(StateIndex, f64); OUTCOMES_PER_ACTION] {
        let [primary, perp1, perp2] = self.next_states(state, action);
        [
            (primary, self.success_prob),
            (perp1, self.perp_prob),
            (perp2, self.perp_prob),
        ]
    }

    /// Resolve a stochastic move using a uniform sample in `[0, 1)`.
    pub fn sample_next(&self, state: StateIndex, action: Action, sample: f64) -> StateIndex {
        let [primary, perp1, perp2] = self.next_states(state, action);
        if sample < self.success_prob {
            primary
        } else if sample < self.success_prob + self.perp_prob {
            perp1
        } else {
            perp2
        }
    }

    pub fn position(&self, state: StateIndex) -> Position {
        let cols = self.cols.max(1);
        Position::new(state.index() / cols, state.index() % cols)
    }

    /// Index of an in-bounds position.
    pub fn index_of(&self, position: Position) -> Option<StateIndex> {
        if position.row >= self.rows || position.col >= self.cols {
            return None;
        }
        Some(StateIndex::from(position.row * self.cols + position.col))
    }

    /// `"row,col"` key of a state.
    pub fn state_key(&self, state: StateIndex) -> String {
        self.position(state).key()
    }

    /// Index for a `"row,col"` key, if it names an in-bounds cell.
    pub fn index_of_key(&self, key: &str) -> Option<StateIndex> {
        self.index_of(Position::parse_key(key)?)
    }

    /// All non-wall states, terminals included.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (0..self.cells.len())
            .map(StateIndex::from)
            .filter(|state| !self.is_wall(*state))
    }

    /// Non-terminal floor states, the ones a policy assigns actions to.
    pub fn decision_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        (0..self.cells.len())
            .map(StateIndex::from)
            .filter(|state| self.cell_type(*state) == CellType::Floor)
    }
}
