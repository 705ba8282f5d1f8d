//! Epsilon-greedy Monte Carlo control with incremental sample averaging.

mod control;
mod episode;
mod rng;

pub use control::{BatchMetrics, McSnapshot, MonteCarloRun, run_monte_carlo, run_monte_carlo_with_hook};
pub use episode::{Episode, TerminalKind, episode_returns};
pub(crate) use episode::generate_episode;
pub use rng::{
    EpisodeRng, MAX_EPISODES_PER_BATCH, SEED_POOL_SIZE, TOTAL_BATCHES, random_seed_pool,
    seed_pool_from,
};
