use std::collections::HashSet;

use gridsolve_mdp::{ACTION_COUNT, Position, StateIndex, TransitionTable};
use serde::Serialize;
use tracing::debug;

use crate::{
    ActionValues, MonteCarloConfig, Phase, Policy, SolverError,
    bellman::greedy_policy_from_action_values,
    mc::{
        Episode, EpisodeRng, MAX_EPISODES_PER_BATCH, TerminalKind, episode_returns,
        generate_episode,
    },
};

/// Immutable record of Monte Carlo progress after one half-batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McSnapshot {
    pub action_values: ActionValues,
    pub policy: Policy,
    pub phase: Phase,
    /// Largest action-value change in the batch; zero for improvement and
    /// initial snapshots.
    pub delta: f64,
    /// Episodes generated for this batch (evaluation snapshots only).
    pub episodes: Vec<Episode>,
    /// Episodes generated so far across all batches.
    pub total_episodes: usize,
}

/// Output of a Monte Carlo control run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloRun {
    pub snapshots: Vec<McSnapshot>,
    pub policy: Policy,
    pub action_values: ActionValues,
}

/// Per-batch summary passed to the run hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchMetrics {
    pub batch: usize,
    pub episodes: usize,
    pub total_episodes: usize,
    pub max_delta: f64,
    pub goal_episodes: usize,
    pub trap_episodes: usize,
    pub truncated_episodes: usize,
    pub mean_episode_len: f64,
}

impl BatchMetrics {
    fn from_batch(batch: usize, episodes: &[Episode], total_episodes: usize, max_delta: f64) -> Self {
        let count_terminal =
            |kind: Option<TerminalKind>| episodes.iter().filter(|e| e.terminal == kind).count();
        let total_len: usize = episodes.iter().map(Episode::len).sum();
        let mean_episode_len = if episodes.is_empty() {
            0.0
        } else {
            total_len as f64 / episodes.len() as f64
        };

        BatchMetrics {
            batch,
            episodes: episodes.len(),
            total_episodes,
            max_delta,
            goal_episodes: count_terminal(Some(TerminalKind::Goal)),
            trap_episodes: count_terminal(Some(TerminalKind::Trap)),
            truncated_episodes: count_terminal(None),
            mean_episode_len,
        }
    }
}

/// Check the seed-pool layout and start cell before any work is done.
fn validate_inputs(
    table: &TransitionTable,
    start: Position,
    config: &MonteCarloConfig,
    seed_pool: &[u32],
) -> Result<StateIndex, SolverError> {
    if config.episodes_per_batch > MAX_EPISODES_PER_BATCH {
        return Err(SolverError::EpisodesPerBatchExceedsCap {
            requested: config.episodes_per_batch,
            cap: MAX_EPISODES_PER_BATCH,
        });
    }

    let required = match config.total_batches {
        0 => 0,
        batches => (batches - 1) * MAX_EPISODES_PER_BATCH + config.episodes_per_batch,
    };
    if seed_pool.len() < required {
        return Err(SolverError::SeedPoolTooSmall {
            required,
            available: seed_pool.len(),
        });
    }

    let state = table.index_of(start).ok_or(SolverError::StartOutOfBounds {
        row: start.row,
        col: start.col,
    })?;
    if table.is_wall(state) {
        return Err(SolverError::StartNotPassable {
            row: start.row,
            col: start.col,
        });
    }
    Ok(state)
}

/// Fold one episode into the running averages. Returns the largest change.
fn update_action_values(
    table: &TransitionTable,
    episode: &Episode,
    config: &MonteCarloConfig,
    action_values: &mut ActionValues,
    visit_counts: &mut [[u64; ACTION_COUNT]],
) -> f64 {
    let returns = episode_returns(table, episode, config.gamma);
    let mut seen = HashSet::new();
    let mut max_delta: f64 = 0.0;

    for (t, &action) in episode.actions.iter().enumerate() {
        let Some(state) = table.index_of(episode.path[t]) else {
            continue;
        };
        if table.is_terminal(state) || table.is_wall(state) {
            continue;
        }
        if config.first_visit && !seen.insert((state, action)) {
            continue;
        }

        let Some(counts) = visit_counts.get_mut(state.index()) else {
            continue;
        };
        counts[action.index()] += 1;
        let count = counts[action.index()] as f64;

        let old = action_values.get(state, action).unwrap_or(0.0);
        let updated = old + (returns[t] - old) / count;
        action_values.set(state, action, updated);
        max_delta = max_delta.max((updated - old).abs());
    }

    max_delta
}

/// Run epsilon-greedy Monte Carlo control.
///
/// See [`run_monte_carlo_with_hook`].
pub fn run_monte_carlo(
    table: &TransitionTable,
    start: Position,
    config: &MonteCarloConfig,
    seed_pool: &[u32],
) -> Result<MonteCarloRun, SolverError> {
    run_monte_carlo_with_hook(table, start, config, seed_pool, |_| {})
}

/// Run epsilon-greedy Monte Carlo control and invoke `on_batch` after each batch.
///
/// Episode `e` of batch `b` draws every random number from the stream seeded
/// by `seed_pool[b * MAX_EPISODES_PER_BATCH + e]`, so the same pool and
/// config always yield the same snapshots. Each batch runs under the policy
/// fixed at its start, then emits an evaluation snapshot (updated Q, old
/// policy, the batch's episodes) and an improvement snapshot (greedy policy).
///
/// Terminal action values are pinned to the terminal reward. Visit counters
/// persist across batches.
pub fn run_monte_carlo_with_hook<F>(
    table: &TransitionTable,
    start: Position,
    config: &MonteCarloConfig,
    seed_pool: &[u32],
    mut on_batch: F,
) -> Result<MonteCarloRun, SolverError>
where
    F: FnMut(&BatchMetrics),
{
    let start = validate_inputs(table, start, config, seed_pool)?;

    let mut action_values = ActionValues::zeros(table);
    for state in table.states().filter(|state| table.is_terminal(*state)) {
        action_values.set_all(state, table.reward(state));
    }

    let start_cells: Vec<StateIndex> = if config.exploring_starts {
        table.decision_states().collect()
    } else {
        Vec::new()
    };

    let mut visit_counts = vec![[0_u64; ACTION_COUNT]; table.state_count()];
    let mut policy = greedy_policy_from_action_values(table, &action_values);
    let mut total_episodes = 0;
    let mut snapshots = vec![McSnapshot {
        action_values: action_values.snapshot(),
        policy: policy.snapshot(),
        phase: Phase::Evaluation,
        delta: 0.0,
        episodes: Vec::new(),
        total_episodes,
    }];

    for batch in 0..config.total_batches {
        let mut episodes = Vec::with_capacity(config.episodes_per_batch);
        let mut max_delta: f64 = 0.0;

        for slot in 0..config.episodes_per_batch {
            let mut rng = EpisodeRng::from_seed(seed_pool[batch * MAX_EPISODES_PER_BATCH + slot]);

            let episode_start = if start_cells.is_empty() {
                start
            } else {
                let pick = (rng.next_uniform() * start_cells.len() as f64) as usize;
                start_cells[pick.min(start_cells.len() - 1)]
            };

            let episode = generate_episode(
                table,
                episode_start,
                config.max_steps_per_episode,
                &policy,
                config.epsilon,
                &mut rng,
            );
            let delta = update_action_values(
                table,
                &episode,
                config,
                &mut action_values,
                &mut visit_counts,
            );
            max_delta = max_delta.max(delta);
            total_episodes += 1;
            episodes.push(episode);
        }

        let metrics = BatchMetrics::from_batch(batch, &episodes, total_episodes, max_delta);

        snapshots.push(McSnapshot {
            action_values: action_values.snapshot(),
            policy: policy.snapshot(),
            phase: Phase::Evaluation,
            delta: max_delta,
            episodes,
            total_episodes,
        });

        policy = greedy_policy_from_action_values(table, &action_values);
        snapshots.push(McSnapshot {
            action_values: action_values.snapshot(),
            policy: policy.snapshot(),
            phase: Phase::Improvement,
            delta: 0.0,
            episodes: Vec::new(),
            total_episodes,
        });

        debug!(
            batch,
            total_episodes,
            max_delta,
            goal_episodes = metrics.goal_episodes,
            trap_episodes = metrics.trap_episodes,
            "monte carlo batch"
        );
        on_batch(&metrics);
    }

    Ok(MonteCarloRun {
        snapshots,
        policy,
        action_values,
    })
}
