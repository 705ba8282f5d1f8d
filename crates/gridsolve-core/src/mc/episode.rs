use gridsolve_mdp::{ACTION_COUNT, Action, CellType, Position, StateIndex, TransitionTable};
use serde::Serialize;

use crate::{Policy, mc::EpisodeRng};

/// Terminal cell an episode ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalKind {
    Goal,
    Trap,
}

/// One generated rollout.
///
/// `path` has one more entry than `actions`: `actions[t]` was taken in
/// `path[t]` and led to `path[t + 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub path: Vec<Position>,
    pub actions: Vec<Action>,
    /// `None` when the step cap ended the episode.
    pub terminal: Option<TerminalKind>,
}

impl Episode {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

fn terminal_kind(cell: CellType) -> Option<TerminalKind> {
    match cell {
        CellType::Goal => Some(TerminalKind::Goal),
        CellType::Trap => Some(TerminalKind::Trap),
        CellType::Floor | CellType::Wall => None,
    }
}

fn random_action(sample: f64) -> Action {
    let index = ((sample * ACTION_COUNT as f64) as usize).min(ACTION_COUNT - 1);
    Action::ALL[index]
}

/// Roll out an epsilon-greedy episode from `start`.
///
/// Every step draws three samples in a fixed order (explore check, random
/// action, transition), including steps that follow the greedy action.
/// Running out of steps ends the episode untagged, even when the last move
/// landed on a terminal.
pub(crate) fn generate_episode(
    table: &TransitionTable,
    start: StateIndex,
    max_steps: usize,
    policy: &Policy,
    epsilon: f64,
    rng: &mut EpisodeRng,
) -> Episode {
    let mut state = start;
    let mut path = vec![table.position(start)];
    let mut actions = Vec::new();
    let mut terminal = None;

    for _ in 0..max_steps {
        if let Some(kind) = terminal_kind(table.cell_type(state)) {
            terminal = Some(kind);
            break;
        }

        let explore_sample = rng.next_uniform();
        let action_sample = rng.next_uniform();
        let transition_sample = rng.next_uniform();

        let action = match policy.get(state) {
            Some(greedy) if explore_sample >= epsilon => greedy,
            _ => random_action(action_sample),
        };

        state = table.sample_next(state, action, transition_sample);
        actions.push(action);
        path.push(table.position(state));
    }

    Episode {
        path,
        actions,
        terminal,
    }
}

/// Discounted return credited to each path position.
///
/// `returns[t]` is the return of the move made from `path[t]`: the reward of
/// the cell it lands in plus the discounted return from there. The last entry
/// is zero since no move leaves the final cell, which makes the first
/// accumulated term the terminal reward (or the last step reward when the
/// episode was truncated).
pub fn episode_returns(table: &TransitionTable, episode: &Episode, gamma: f64) -> Vec<f64> {
    let mut returns = vec![0.0; episode.path.len()];
    for t in (0..episode.path.len().saturating_sub(1)).rev() {
        let landed = table
            .index_of(episode.path[t + 1])
            .map_or(0.0, |next| table.reward(next));
        returns[t] = landed + gamma * returns[t + 1];
    }
    returns
}
