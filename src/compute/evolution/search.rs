//! The Ant Lion optimizer: per-epoch evolution and the run lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

use crate::compute::{EvaluationError, Problem, ProblemError};
use crate::schema::{
    Agent, ConfigError, EvolutionProgress, History, OptimizationResult, OptimizerConfig, RunStats,
    StopReason, sort_population,
};

use super::evaluator::{Evaluator, evaluator_for};
use super::roulette::roulette_index;
use super::walk::{RandomWalk, walk_for};
use super::SearchRng;

/// Initial sampling gives up after this many attempts per population slot.
const INIT_ATTEMPTS_PER_SLOT: usize = 10;

/// Ant Lion optimizer.
///
/// Each epoch, every new ant walks around a roulette-selected antlion and
/// around the elite; the ant lands at the average of the two walks at the
/// current epoch's step. Ants and antlions are then merged, the best
/// `pop_size` survive, and the elite replaces the worst survivor.
pub struct AntLionOptimizer {
    config: OptimizerConfig,
    walk: Box<dyn RandomWalk>,
    evaluator: Box<dyn Evaluator>,
    rng: SearchRng,
    population: Vec<Agent>,
    elite: Option<Agent>,
    history: History,
    epoch: usize,
    evaluations: u64,
    failed_evaluations: u64,
    stagnation_count: usize,
    next_id: u64,
    started: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl AntLionOptimizer {
    /// Create an optimizer, validating the config.
    ///
    /// The walk strategy and evaluator come from the config and can be
    /// replaced with [`with_walk`](Self::with_walk) and
    /// [`with_evaluator`](Self::with_evaluator).
    pub fn new(config: OptimizerConfig) -> Result<Self, OptimizerError> {
        config.validate()?;
        let evaluator = evaluator_for(config.mode, config.n_workers)?;
        let walk = walk_for(config.walk);
        let rng = config
            .random_seed
            .map_or_else(SearchRng::random, SearchRng::new);

        Ok(Self {
            config,
            walk,
            evaluator,
            rng,
            population: Vec::new(),
            elite: None,
            history: History::default(),
            epoch: 0,
            evaluations: 0,
            failed_evaluations: 0,
            stagnation_count: 0,
            next_id: 0,
            started: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replace the evaluator.
    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Replace the random-walk strategy.
    pub fn with_walk(mut self, walk: impl RandomWalk + 'static) -> Self {
        self.walk = Box::new(walk);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Current population, best first.
    pub fn population(&self) -> &[Agent] {
        &self.population
    }

    /// Best agent found so far.
    pub fn elite(&self) -> Option<&Agent> {
        self.elite.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Epochs completed.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Sample and evaluate the initial population.
    ///
    /// Candidates whose evaluation fails are resampled.
    pub fn initialize(&mut self, problem: &Problem) -> Result<(), OptimizerError> {
        self.population.clear();
        self.elite = None;
        self.history = History::default();
        self.epoch = 0;
        self.evaluations = 0;
        self.failed_evaluations = 0;
        self.stagnation_count = 0;
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }

        let pop_size = self.config.pop_size;
        let max_attempts = INIT_ATTEMPTS_PER_SLOT * pop_size;
        let mut attempts = 0;
        while self.population.len() < pop_size && attempts < max_attempts {
            let needed = (pop_size - self.population.len()).min(max_attempts - attempts);
            let batch: Vec<Vec<f64>> = (0..needed)
                .map(|_| problem.bounds().random_solution(&mut self.rng))
                .collect();
            attempts += needed;
            let agents = self.evaluate_candidates(problem, batch, 0);
            self.population.extend(agents);
        }

        if self.population.len() < pop_size {
            return Err(OptimizerError::InitializationFailed {
                required: pop_size,
                produced: self.population.len(),
            });
        }

        sort_population(&mut self.population, problem.direction());
        self.elite = Some(self.population[0].clone());
        Ok(())
    }

    /// Evaluate a batch and wrap the successes as agents.
    fn evaluate_candidates(
        &mut self,
        problem: &Problem,
        batch: Vec<Vec<f64>>,
        epoch: usize,
    ) -> Vec<Agent> {
        let results = self.evaluator.evaluate_batch(problem, &batch);
        self.evaluations += batch.len() as u64;
        if results.len() != batch.len() {
            warn!(
                "Evaluator {} returned {} results for {} candidates at epoch {epoch}",
                self.evaluator.name(),
                results.len(),
                batch.len(),
            );
        }

        // Candidates without a result count as failed.
        let mut results = results.into_iter();
        let mut agents = Vec::with_capacity(batch.len());
        for solution in batch {
            match results.next().unwrap_or(Err(EvaluationError::MissingResult)) {
                Ok(target) => {
                    agents.push(Agent {
                        id: self.next_id,
                        solution,
                        target,
                        epoch,
                    });
                    self.next_id += 1;
                }
                Err(err) => {
                    self.failed_evaluations += 1;
                    warn!("Dropping candidate at epoch {epoch}: {err}");
                }
            }
        }
        agents
    }

    /// Run one epoch.
    pub fn evolve(&mut self, problem: &Problem) -> Result<(), OptimizerError> {
        let elite = self.elite.clone().ok_or(OptimizerError::NotInitialized)?;
        let epoch_start = Instant::now();

        let epoch = self.epoch + 1;
        let horizon = self.config.epoch;
        // Every ant reads the walks at the current epoch's step.
        let column = (epoch - 1).min(horizon - 1);
        let pop_size = self.config.pop_size;
        let direction = problem.direction();
        let bounds = problem.bounds();

        let fitness: Vec<f64> = self.population.iter().map(Agent::fitness).collect();
        let mut batch = Vec::with_capacity(pop_size);
        for _ in 0..pop_size {
            let idx = roulette_index(&fitness, direction, &mut self.rng);
            let around_antlion = self.walk.generate(
                &self.population[idx].solution,
                epoch,
                horizon,
                bounds,
                &mut self.rng,
            );
            let around_elite =
                self.walk
                    .generate(&elite.solution, epoch, horizon, bounds, &mut self.rng);

            let raw: Vec<f64> = around_antlion
                .column(column)
                .iter()
                .zip(around_elite.column(column))
                .map(|(a, e)| 0.5 * (a + e))
                .collect();
            batch.push(bounds.correct(&raw));
        }

        let ants = self.evaluate_candidates(problem, batch, epoch);

        let mut merged = std::mem::take(&mut self.population);
        merged.extend(ants);
        sort_population(&mut merged, direction);
        merged.truncate(pop_size);
        if let Some(worst) = merged.last_mut() {
            *worst = elite.clone();
        }
        sort_population(&mut merged, direction);
        self.population = merged;
        self.epoch = epoch;

        let current_best = &self.population[0];
        if current_best.is_better_than(&elite, direction) {
            let gain = (current_best.fitness() - elite.fitness()).abs();
            if gain > self.config.termination.early_stop_epsilon {
                self.stagnation_count = 0;
            } else {
                self.stagnation_count += 1;
            }
            self.elite = Some(current_best.clone());
        } else {
            self.stagnation_count += 1;
        }

        self.record_history(epoch_start.elapsed().as_secs_f64());
        Ok(())
    }

    fn record_history(&mut self, epoch_seconds: f64) {
        let n = self.population.len() as f64;
        let best = self.elite.as_ref().map_or(f64::NAN, Agent::fitness);
        let current_best = self.population.first().map_or(f64::NAN, Agent::fitness);
        let current_worst = self.population.last().map_or(f64::NAN, Agent::fitness);
        let avg_fitness = self.population.iter().map(Agent::fitness).sum::<f64>() / n;

        self.history.global_best.push(best);
        self.history.current_best.push(current_best);
        self.history.current_worst.push(current_worst);
        self.history.avg_fitness.push(avg_fitness);
        self.history.diversity.push(population_diversity(&self.population));
        self.history.epoch_seconds.push(epoch_seconds);
        if self.config.save_population {
            self.history.populations.push(self.population.clone());
        }
    }

    fn elapsed_seconds(&self) -> f64 {
        self.started
            .map_or(0.0, |start| start.elapsed().as_secs_f64())
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        EvolutionProgress {
            epoch: self.epoch,
            total_epochs: self.config.epoch,
            evaluations: self.evaluations,
            best_fitness: self.elite.as_ref().map_or(f64::NAN, Agent::fitness),
            current_best: self.population.first().map_or(f64::NAN, Agent::fitness),
            stagnation_count: self.stagnation_count,
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    /// Check if the run should stop.
    fn should_stop(&self, problem: &Problem) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if self.epoch >= self.config.epoch {
            return Some(StopReason::MaxEpochs);
        }

        let termination = &self.config.termination;
        if let (Some(target), Some(elite)) = (termination.target_fitness, &self.elite)
            && !problem.direction().is_better(target, elite.fitness())
        {
            return Some(StopReason::TargetReached);
        }

        if let Some(limit) = termination.max_evaluations
            && self.evaluations >= limit
        {
            return Some(StopReason::MaxEvaluations);
        }

        if let Some(limit) = termination.max_time_secs
            && self.elapsed_seconds() >= limit
        {
            return Some(StopReason::TimeLimit);
        }

        if let Some(limit) = termination.max_early_stop
            && self.stagnation_count >= limit
        {
            return Some(StopReason::EarlyStop);
        }

        None
    }

    /// Run the optimizer with a progress callback.
    pub fn run_with_callback<F>(
        &mut self,
        problem: &Problem,
        callback: F,
    ) -> Result<OptimizationResult, OptimizerError>
    where
        F: Fn(&EvolutionProgress),
    {
        self.started = Some(Instant::now());
        info!(
            "Solving {} ({} dims, {:?}) with epoch={}, pop_size={}, walk={}, evaluator={}",
            problem.name(),
            problem.n_dims(),
            problem.direction(),
            self.config.epoch,
            self.config.pop_size,
            self.walk.name(),
            self.evaluator.name(),
        );

        self.initialize(problem)?;
        callback(&self.progress());

        let stop_reason = loop {
            if let Some(reason) = self.should_stop(problem) {
                break reason;
            }

            self.evolve(problem)?;

            let progress = self.progress();
            debug!(
                "{}: epoch {}, current best {:.6e}, global best {:.6e}, runtime {:.4}s",
                problem.name(),
                progress.epoch,
                progress.current_best,
                progress.best_fitness,
                self.history.epoch_seconds.last().copied().unwrap_or_default(),
            );
            callback(&progress);
        };

        let best = self.elite.clone().ok_or(OptimizerError::NotInitialized)?;
        let elapsed_seconds = self.elapsed_seconds();
        info!(
            "{} stopped after {} epochs ({:?}): best fitness {:.6e} in {:.2}s",
            problem.name(),
            self.epoch,
            stop_reason,
            best.fitness(),
            elapsed_seconds,
        );

        Ok(OptimizationResult {
            stats: RunStats {
                epochs: self.epoch,
                evaluations: self.evaluations,
                failed_evaluations: self.failed_evaluations,
                best_fitness: best.fitness(),
                elapsed_seconds,
                stop_reason,
            },
            best,
            history: self.history.clone(),
        })
    }

    /// Run the optimizer (blocking).
    pub fn solve(&mut self, problem: &Problem) -> Result<OptimizationResult, OptimizerError> {
        self.run_with_callback(problem, |_| {})
    }
}

/// Mean over dimensions of the population's standard deviation.
fn population_diversity(population: &[Agent]) -> f64 {
    let Some(first) = population.first() else {
        return 0.0;
    };
    let n = population.len() as f64;
    let n_dims = first.solution.len();
    if n_dims == 0 {
        return 0.0;
    }

    let total: f64 = (0..n_dims)
        .map(|k| {
            let mean = population.iter().map(|a| a.solution[k]).sum::<f64>() / n;
            let var = population
                .iter()
                .map(|a| (a.solution[k] - mean).powi(2))
                .sum::<f64>()
                / n;
            var.sqrt()
        })
        .sum();
    total / n_dims as f64
}

/// Optimizer errors.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid optimizer config: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid problem: {0}")]
    Problem(#[from] ProblemError),
    #[error("Failed to build evaluation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Only {produced} of {required} initial candidates could be evaluated")]
    InitializationFailed { required: usize, produced: usize },
    #[error("Optimizer has not been initialized")]
    NotInitialized,
}
