use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::mc::MAX_EPISODES_PER_BATCH;

const DEFAULT_DP_CONFIG_YAML: &str = include_str!("../config/dp.default.yaml");
const DEFAULT_MONTE_CARLO_CONFIG_YAML: &str = include_str!("../config/monte_carlo.default.yaml");

/// Parameters shared by the dynamic-programming solvers.
///
/// The iteration caps are hard truncation limits: hitting one returns the
/// values and policy computed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpConfig {
    pub gamma: f64,
    /// Sweeps stop once the largest value change drops below this.
    pub theta: f64,
    /// Outer evaluation/improvement rounds for policy iteration.
    pub max_outer_iterations: usize,
    /// Evaluation sweeps per policy-iteration round.
    pub max_eval_sweeps: usize,
    /// Sweeps for value iteration.
    pub max_sweeps: usize,
}

impl Default for DpConfig {
    fn default() -> Self {
        DpConfig {
            gamma: 0.9,
            theta: 0.01,
            max_outer_iterations: 50,
            max_eval_sweeps: 200,
            max_sweeps: 500,
        }
    }
}

impl DpConfig {
    /// Default config with the given discount and threshold.
    pub fn new(gamma: f64, theta: f64) -> Self {
        DpConfig {
            gamma,
            theta,
            ..DpConfig::default()
        }
    }

    /// Parse a DP config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: DpConfig = serde_yaml::from_str(yaml).map_err(ConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a DP config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_DP_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check parameter ranges. A non-positive `theta` is accepted; the
    /// sweep caps then bound the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gamma(self.gamma)?;
        if self.theta.is_nan() {
            return Err(ConfigError::Invalid("theta must not be NaN".to_string()));
        }
        if self.max_outer_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_outer_iterations must be greater than 0".to_string(),
            ));
        }
        if self.max_eval_sweeps == 0 {
            return Err(ConfigError::Invalid(
                "max_eval_sweeps must be greater than 0".to_string(),
            ));
        }
        if self.max_sweeps == 0 {
            return Err(ConfigError::Invalid(
                "max_sweeps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for epsilon-greedy Monte Carlo control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub gamma: f64,
    /// Probability of taking a uniformly random action.
    pub epsilon: f64,
    pub episodes_per_batch: usize,
    pub total_batches: usize,
    /// Resample the start among non-terminal floor cells for every episode.
    pub exploring_starts: bool,
    /// Count only the first occurrence of a state-action pair per episode.
    pub first_visit: bool,
    pub max_steps_per_episode: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig {
            gamma: 0.9,
            epsilon: 0.1,
            episodes_per_batch: 20,
            total_batches: 30,
            exploring_starts: false,
            first_visit: true,
            max_steps_per_episode: 200,
        }
    }
}

impl MonteCarloConfig {
    /// Parse a Monte Carlo config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: MonteCarloConfig = serde_yaml::from_str(yaml).map_err(ConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a Monte Carlo config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_MONTE_CARLO_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_gamma(self.gamma)?;
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::Invalid(
                "epsilon must be within [0, 1]".to_string(),
            ));
        }
        if self.episodes_per_batch == 0 || self.episodes_per_batch > MAX_EPISODES_PER_BATCH {
            return Err(ConfigError::Invalid(format!(
                "episodes_per_batch must be within [1, {MAX_EPISODES_PER_BATCH}]"
            )));
        }
        if self.total_batches == 0 {
            return Err(ConfigError::Invalid(
                "total_batches must be greater than 0".to_string(),
            ));
        }
        if self.max_steps_per_episode == 0 {
            return Err(ConfigError::Invalid(
                "max_steps_per_episode must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_gamma(gamma: f64) -> Result<(), ConfigError> {
    if !gamma.is_finite() || !(0.0..=1.0).contains(&gamma) {
        return Err(ConfigError::Invalid(
            "gamma must be finite and within [0, 1]".to_string(),
        ));
    }
    Ok(())
}

/// Error type for loading and validating solver configs.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            ConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}
