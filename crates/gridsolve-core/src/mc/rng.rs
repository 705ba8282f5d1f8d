use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed slots reserved per batch in the pool.
pub const MAX_EPISODES_PER_BATCH: usize = 50;
/// Batches in the reference configuration.
pub const TOTAL_BATCHES: usize = 30;
/// One seed per episode slot across all reference batches.
pub const SEED_POOL_SIZE: usize = TOTAL_BATCHES * MAX_EPISODES_PER_BATCH;

/// Uniform stream owned by a single episode.
///
/// The output depends only on the seed, never on other generators or on a
/// process-wide source.
#[derive(Debug, Clone)]
pub struct EpisodeRng {
    rng: ChaCha8Rng,
}

impl EpisodeRng {
    pub fn from_seed(seed: u32) -> Self {
        EpisodeRng {
            rng: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Next uniform sample in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.r#gen()
    }
}

/// Draw a full seed pool from `rng`.
pub fn seed_pool_from<R: RngCore + ?Sized>(rng: &mut R) -> Vec<u32> {
    (0..SEED_POOL_SIZE).map(|_| rng.next_u32()).collect()
}

/// Draw a full seed pool from the thread RNG. Keep the pool to replay a run.
pub fn random_seed_pool() -> Vec<u32> {
    seed_pool_from(&mut rand::thread_rng())
}
