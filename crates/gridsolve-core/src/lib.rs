mod analysis;
pub mod bellman;
mod config;
mod dp;
mod error;
mod mc;
mod snapshot;
mod values;

#[cfg(test)]
mod tests;

pub use analysis::{
    OPTIMALITY_TOLERANCE, ValueRange, action_value_rmse, optimal_action_values, policy_agreement,
    value_range,
};
pub use config::{ConfigError, DpConfig, MonteCarloConfig};
pub use dp::{policy_iteration_q, policy_iteration_v, value_iteration_q, value_iteration_v};
pub use error::SolverError;
pub use mc::{
    BatchMetrics, Episode, EpisodeRng, MAX_EPISODES_PER_BATCH, McSnapshot, MonteCarloRun,
    SEED_POOL_SIZE, TOTAL_BATCHES, TerminalKind, episode_returns, random_seed_pool,
    run_monte_carlo, run_monte_carlo_with_hook, seed_pool_from,
};
pub use snapshot::{DpSolution, Phase, Snapshot};
pub use values::{ActionValues, Policy, StateValues};
