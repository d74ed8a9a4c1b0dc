//! Configuration types for Ant Lion optimizer runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ProblemConfig;

/// Accepted range for the epoch count.
pub const EPOCH_RANGE: (usize, usize) = (1, 100_000);
/// Accepted range for the population size.
pub const POP_SIZE_RANGE: (usize, usize) = (5, 10_000);

/// Optimizer hyperparameters and run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Maximum number of epochs. Also the random-walk horizon.
    #[serde(default = "default_epoch")]
    pub epoch: usize,
    /// Number of antlions kept in the population.
    #[serde(default = "default_pop_size")]
    pub pop_size: usize,
    /// Random-walk construction strategy.
    #[serde(default)]
    pub walk: WalkStrategy,
    /// How candidate batches are evaluated.
    #[serde(default)]
    pub mode: EvaluationMode,
    /// Worker threads for parallel evaluation. `None` uses the global rayon pool.
    #[serde(default)]
    pub n_workers: Option<usize>,
    /// Additional stopping criteria.
    #[serde(default)]
    pub termination: TerminationConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Record the full population after every epoch.
    #[serde(default)]
    pub save_population: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            pop_size: default_pop_size(),
            walk: WalkStrategy::default(),
            mode: EvaluationMode::default(),
            n_workers: None,
            termination: TerminationConfig::default(),
            random_seed: None,
            save_population: false,
        }
    }
}

fn default_epoch() -> usize {
    10_000
}
fn default_pop_size() -> usize {
    100
}

/// Random-walk construction strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WalkStrategy {
    /// One dimension at a time: each dimension draws its whole horizon of steps.
    #[default]
    Sequential,
    /// All dimensions at once: steps for every dimension are drawn per time step.
    Batch,
}

/// Evaluation mode for candidate batches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Evaluate candidates one after another on the calling thread.
    #[default]
    Sequential,
    /// Evaluate candidates on a rayon thread pool.
    Parallel,
}

/// Stopping criteria beyond the epoch limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Stop once this many objective evaluations have been spent.
    #[serde(default)]
    pub max_evaluations: Option<u64>,
    /// Stop once this much wall-clock time has elapsed.
    #[serde(default)]
    pub max_time_secs: Option<f64>,
    /// Stop after this many consecutive epochs without improvement.
    #[serde(default)]
    pub max_early_stop: Option<usize>,
    /// Minimum change in global best fitness that counts as improvement.
    #[serde(default = "default_early_stop_epsilon")]
    pub early_stop_epsilon: f64,
    /// Stop once the global best reaches this fitness.
    #[serde(default)]
    pub target_fitness: Option<f64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            max_evaluations: None,
            max_time_secs: None,
            max_early_stop: None,
            early_stop_epsilon: default_early_stop_epsilon(),
            target_fitness: None,
        }
    }
}

fn default_early_stop_epsilon() -> f64 {
    1e-10
}

impl OptimizerConfig {
    /// Create a config with the given epoch count and population size.
    pub fn new(epoch: usize, pop_size: usize) -> Self {
        Self {
            epoch,
            pop_size,
            ..Default::default()
        }
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the random-walk strategy.
    pub fn with_walk(mut self, walk: WalkStrategy) -> Self {
        self.walk = walk;
        self
    }

    /// Set the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("epoch", self.epoch, EPOCH_RANGE)?;
        check_range("pop_size", self.pop_size, POP_SIZE_RANGE)?;

        if self.n_workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }

        let t = &self.termination;
        if t.max_evaluations == Some(0) {
            return Err(ConfigError::InvalidTermination(
                "max_evaluations must be positive".into(),
            ));
        }
        if let Some(secs) = t.max_time_secs
            && !(secs.is_finite() && secs > 0.0)
        {
            return Err(ConfigError::InvalidTermination(format!(
                "max_time_secs must be positive, got {secs}"
            )));
        }
        if t.max_early_stop == Some(0) {
            return Err(ConfigError::InvalidTermination(
                "max_early_stop must be positive".into(),
            ));
        }
        if !(t.early_stop_epsilon.is_finite() && t.early_stop_epsilon >= 0.0) {
            return Err(ConfigError::InvalidTermination(format!(
                "early_stop_epsilon must be non-negative, got {}",
                t.early_stop_epsilon
            )));
        }
        if let Some(target) = t.target_fitness
            && !target.is_finite()
        {
            return Err(ConfigError::InvalidTermination(
                "target_fitness must be finite".into(),
            ));
        }

        Ok(())
    }
}

fn check_range(name: &'static str, value: usize, range: (usize, usize)) -> Result<(), ConfigError> {
    if value < range.0 || value > range.1 {
        return Err(ConfigError::ParameterOutOfRange {
            name,
            value,
            min: range.0,
            max: range.1,
        });
    }
    Ok(())
}

/// A complete run description: what to optimize and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Problem to solve.
    pub problem: ProblemConfig,
    /// Optimizer settings.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl RunConfig {
    /// Load a run configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.optimizer.validate()?;
        Ok(config)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Parameter {name} = {value} is outside the accepted range [{min}, {max}]")]
    ParameterOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
    #[error("Worker count must be non-zero")]
    InvalidWorkers,
    #[error("Invalid termination criterion: {0}")]
    InvalidTermination(String),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
