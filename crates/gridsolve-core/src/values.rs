//! Working-state containers for the solvers.
//!
//! All three are dense vectors indexed by [`StateIndex`], so sweeps never
//! allocate or hash keys. The `"row,col"` keyed view that renderers consume
//! is produced on demand by `get_key`, `to_keyed`, and the `Serialize` impls.

use std::collections::BTreeMap;

use gridsolve_mdp::{ACTION_COUNT, Action, Position, StateIndex, TransitionTable};
use rand::Rng;
use serde::{Serialize, Serializer};

/// Lower/upper bound of randomized initial values.
const RANDOM_VALUE_RANGE: (f64, f64) = (-10.0, 10.0);

fn key_to_index(cols: usize, len: usize, key: &str) -> Option<StateIndex> {
    let position = Position::parse_key(key)?;
    if position.col >= cols {
        return None;
    }
    let index = position.row.checked_mul(cols)?.checked_add(position.col)?;
    (index < len).then(|| StateIndex::from(index))
}

fn index_to_key(cols: usize, index: usize) -> String {
    let cols = cols.max(1);
    Position::new(index / cols, index % cols).key()
}

/// Action chosen in each non-terminal floor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    cols: usize,
    actions: Vec<Option<Action>>,
}

impl Policy {
    /// A policy with no actions assigned.
    pub fn empty(table: &TransitionTable) -> Self {
        Policy {
            cols: table.cols(),
            actions: vec![None; table.state_count()],
        }
    }

    /// Assign `action` to every decision state.
    pub fn uniform(table: &TransitionTable, action: Action) -> Self {
        let mut policy = Policy::empty(table);
        for state in table.decision_states() {
            policy.set(state, action);
        }
        policy
    }

    /// Uniformly random action per decision state, drawn from the thread RNG.
    /// Not replayable; use [`Policy::randomized_with`] when it must be.
    pub fn randomized(table: &TransitionTable) -> Self {
        Self::randomized_with(table, &mut rand::thread_rng())
    }

    pub fn randomized_with<R: Rng + ?Sized>(table: &TransitionTable, rng: &mut R) -> Self {
        let mut policy = Policy::empty(table);
        for state in table.decision_states() {
            let action = Action::ALL[rng.gen_range(0..ACTION_COUNT)];
            policy.set(state, action);
        }
        policy
    }

    pub fn get(&self, state: StateIndex) -> Option<Action> {
        self.actions.get(state.index()).copied().flatten()
    }

    /// Out-of-range states are ignored.
    pub fn set(&mut self, state: StateIndex, action: Action) {
        if let Some(slot) = self.actions.get_mut(state.index()) {
            *slot = Some(action);
        }
    }

    pub fn get_key(&self, key: &str) -> Option<Action> {
        key_to_index(self.cols, self.actions.len(), key).and_then(|state| self.get(state))
    }

    /// Number of states with an assigned action.
    pub fn len(&self) -> usize {
        self.actions.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, Action)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .filter_map(|(index, action)| action.map(|action| (StateIndex::from(index), action)))
    }

    pub fn to_keyed(&self) -> BTreeMap<String, Action> {
        self.iter()
            .map(|(state, action)| (index_to_key(self.cols, state.index()), action))
            .collect()
    }

    /// Deep copy for inclusion in a snapshot.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_keyed().serialize(serializer)
    }
}

/// Value estimate for every non-wall state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateValues {
    cols: usize,
    values: Vec<Option<f64>>,
}

impl StateValues {
    /// A container with no values defined.
    pub fn empty(table: &TransitionTable) -> Self {
        StateValues {
            cols: table.cols(),
            values: vec![None; table.state_count()],
        }
    }

    /// Zero for every non-wall state.
    pub fn zeros(table: &TransitionTable) -> Self {
        let mut values = StateValues::empty(table);
        for state in table.states() {
            values.set(state, 0.0);
        }
        values
    }

    /// Uniform values in `[-10, 10)` from the thread RNG. Not replayable.
    pub fn randomized(table: &TransitionTable) -> Self {
        Self::randomized_with(table, &mut rand::thread_rng())
    }

    pub fn randomized_with<R: Rng + ?Sized>(table: &TransitionTable, rng: &mut R) -> Self {
        let (low, high) = RANDOM_VALUE_RANGE;
        let mut values = StateValues::empty(table);
        for state in table.states() {
            values.set(state, rng.gen_range(low..high));
        }
        values
    }

    pub fn get(&self, state: StateIndex) -> Option<f64> {
        self.values.get(state.index()).copied().flatten()
    }

    /// Value of `state`, reading undefined entries as zero.
    pub fn value_or_zero(&self, state: StateIndex) -> f64 {
        self.get(state).unwrap_or(0.0)
    }

    /// Out-of-range states are ignored.
    pub fn set(&mut self, state: StateIndex, value: f64) {
        if let Some(slot) = self.values.get_mut(state.index()) {
            *slot = Some(value);
        }
    }

    pub fn get_key(&self, key: &str) -> Option<f64> {
        key_to_index(self.cols, self.values.len(), key).and_then(|state| self.get(state))
    }

    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| value.map(|value| (StateIndex::from(index), value)))
    }

    pub fn to_keyed(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(state, value)| (index_to_key(self.cols, state.index()), value))
            .collect()
    }

    /// Deep copy for inclusion in a snapshot.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Serialize for StateValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_keyed().serialize(serializer)
    }
}

/// Per-action value estimate for every non-wall state.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionValues {
    cols: usize,
    values: Vec<Option<[f64; ACTION_COUNT]>>,
}

impl ActionValues {
    /// A container with no values defined.
    pub fn empty(table: &TransitionTable) -> Self {
        ActionValues {
            cols: table.cols(),
            values: vec![None; table.state_count()],
        }
    }

    /// Zero for every action of every non-wall state.
    pub fn zeros(table: &TransitionTable) -> Self {
        let mut values = ActionValues::empty(table);
        for state in table.states() {
            values.set_all(state, 0.0);
        }
        values
    }

    /// Uniform values in `[-10, 10)` from the thread RNG. Not replayable.
    pub fn randomized(table: &TransitionTable) -> Self {
        Self::randomized_with(table, &mut rand::thread_rng())
    }

    pub fn randomized_with<R: Rng + ?Sized>(table: &TransitionTable, rng: &mut R) -> Self {
        let (low, high) = RANDOM_VALUE_RANGE;
        let mut values = ActionValues::empty(table);
        for state in table.states() {
            for action in Action::ALL {
                values.set(state, action, rng.gen_range(low..high));
            }
        }
        values
    }

    pub fn get(&self, state: StateIndex, action: Action) -> Option<f64> {
        self.row(state).map(|row| row[action.index()])
    }

    /// All four action values of `state`, in [`Action::ALL`] order.
    pub fn row(&self, state: StateIndex) -> Option<&[f64; ACTION_COUNT]> {
        self.values.get(state.index()).and_then(Option::as_ref)
    }

    /// Set one entry. Undefined rows are created with zeros first.
    pub fn set(&mut self, state: StateIndex, action: Action, value: f64) {
        if let Some(slot) = self.values.get_mut(state.index()) {
            slot.get_or_insert([0.0; ACTION_COUNT])[action.index()] = value;
        }
    }

    /// Set every action of `state` to `value`.
    pub fn set_all(&mut self, state: StateIndex, value: f64) {
        if let Some(slot) = self.values.get_mut(state.index()) {
            *slot = Some([value; ACTION_COUNT]);
        }
    }

    pub fn get_key(&self, key: &str, action: Action) -> Option<f64> {
        key_to_index(self.cols, self.values.len(), key).and_then(|state| self.get(state, action))
    }

    pub fn len(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &[f64; ACTION_COUNT])> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, row)| row.as_ref().map(|row| (StateIndex::from(index), row)))
    }

    pub fn to_keyed(&self) -> BTreeMap<String, BTreeMap<Action, f64>> {
        self.iter()
            .map(|(state, row)| {
                let actions = Action::ALL
                    .into_iter()
                    .map(|action| (action, row[action.index()]))
                    .collect();
                (index_to_key(self.cols, state.index()), actions)
            })
            .collect()
    }

    /// Deep copy for inclusion in a snapshot.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl Serialize for ActionValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_keyed().serialize(serializer)
    }
}
