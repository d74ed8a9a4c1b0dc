//! Run history, progress, and result types.

use serde::{Deserialize, Serialize};

use super::Agent;

/// Per-epoch history for plotting and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct History {
    /// Global best fitness after each epoch.
    pub global_best: Vec<f64>,
    /// Best fitness in the population after each epoch.
    pub current_best: Vec<f64>,
    /// Worst fitness in the population after each epoch.
    pub current_worst: Vec<f64>,
    /// Mean population fitness after each epoch.
    pub avg_fitness: Vec<f64>,
    /// Mean per-dimension standard deviation of solutions.
    pub diversity: Vec<f64>,
    /// Wall-clock seconds spent in each epoch.
    pub epoch_seconds: Vec<f64>,
    /// Full population after each epoch (only when enabled).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub populations: Vec<Vec<Agent>>,
}

impl History {
    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.global_best.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.global_best.is_empty()
    }
}

/// Snapshot passed to progress callbacks after each epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Epochs completed.
    pub epoch: usize,
    /// Configured epoch limit.
    pub total_epochs: usize,
    /// Objective evaluations spent so far.
    pub evaluations: u64,
    /// Global best fitness.
    pub best_fitness: f64,
    /// Best fitness in the current population.
    pub current_best: f64,
    /// Consecutive epochs without improvement.
    pub stagnation_count: usize,
    /// Seconds since the run started.
    pub elapsed_seconds: f64,
}

/// Final result of an optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best agent found.
    pub best: Agent,
    /// Statistics from the run.
    pub stats: RunStats,
    /// Full history for analysis.
    pub history: History,
}

/// Statistics from an optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Epochs completed.
    pub epochs: usize,
    /// Objective evaluations performed, including failed ones.
    pub evaluations: u64,
    /// Candidates dropped because evaluation failed.
    pub failed_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason the run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Reached the epoch limit.
    MaxEpochs,
    /// Spent the evaluation budget.
    MaxEvaluations,
    /// Ran out of wall-clock time.
    TimeLimit,
    /// No improvement for too many epochs.
    EarlyStop,
    /// Reached the target fitness.
    TargetReached,
    /// User cancelled.
    Cancelled,
}
