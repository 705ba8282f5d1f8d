use serde::{Deserialize, Serialize};

/// Probability that the intended move succeeds in the reference setup.
pub const DEFAULT_SUCCESS_PROB: f64 = 0.8;

/// Reward collected when a transition lands in a cell of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardModel {
    pub goal: f64,
    pub trap: f64,
    pub step: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        RewardModel {
            goal: 10.0,
            trap: -10.0,
            step: -0.1,
        }
    }
}
