use serde::Serialize;

use crate::{ActionValues, Policy, StateValues};

/// Which half of the evaluate/improve cycle produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Evaluation,
    Improvement,
}

/// Immutable record of solver progress after one step.
///
/// Every field is a deep copy taken at capture time; later sweeps never
/// reach back into a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub state_values: StateValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_values: Option<ActionValues>,
    pub policy: Policy,
    pub phase: Phase,
    /// Largest absolute value change in the producing sweep; zero for
    /// initial and improvement snapshots.
    pub delta: f64,
}

impl Snapshot {
    pub(crate) fn of_values(values: &StateValues, policy: &Policy, phase: Phase, delta: f64) -> Self {
        Snapshot {
            state_values: values.snapshot(),
            action_values: None,
            policy: policy.snapshot(),
            phase,
            delta,
        }
    }

    pub(crate) fn of_action_values(
        action_values: &ActionValues,
        state_values: &StateValues,
        policy: &Policy,
        phase: Phase,
        delta: f64,
    ) -> Self {
        Snapshot {
            state_values: state_values.snapshot(),
            action_values: Some(action_values.snapshot()),
            policy: policy.snapshot(),
            phase,
            delta,
        }
    }
}

/// Output of a dynamic-programming solver run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DpSolution {
    /// Every captured step, in causal order, starting with the initial state.
    pub snapshots: Vec<Snapshot>,
    pub policy: Policy,
    pub state_values: StateValues,
    /// Present for the Q-space solvers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_values: Option<ActionValues>,
}

impl DpSolution {
    /// Number of improvement-phase snapshots.
    pub fn improvement_count(&self) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.phase == Phase::Improvement)
            .count()
    }

    /// The snapshot a replay would end on.
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}
