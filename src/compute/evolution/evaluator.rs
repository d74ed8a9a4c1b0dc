//! Batch fitness evaluation, sequential or on a rayon pool.

use std::fmt;

use rayon::prelude::*;

use crate::compute::{EvaluationError, Problem, evaluate_checked};
use crate::schema::{EvaluationMode, Target};

/// Evaluates a batch of candidate solutions.
///
/// Returns one result per candidate, in input order. A failed candidate does
/// not affect the others.
pub trait Evaluator: Send + Sync + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn evaluate_batch(
        &self,
        problem: &Problem,
        batch: &[Vec<f64>],
    ) -> Vec<Result<Target, EvaluationError>>;
}

/// Evaluates candidates one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEvaluator;

impl Evaluator for SequentialEvaluator {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn evaluate_batch(
        &self,
        problem: &Problem,
        batch: &[Vec<f64>],
    ) -> Vec<Result<Target, EvaluationError>> {
        batch.iter().map(|solution| problem.evaluate(solution)).collect()
    }
}

/// Evaluates candidates in parallel with rayon.
pub struct ParallelEvaluator {
    pool: Option<rayon::ThreadPool>,
}

impl ParallelEvaluator {
    /// Use the global rayon pool.
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Use a dedicated pool of `n_workers` threads.
    pub fn with_workers(n_workers: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .thread_name(|i| format!("ant-lion-eval-{i}"))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    /// Worker threads available to this evaluator.
    pub fn n_workers(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

impl Default for ParallelEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParallelEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelEvaluator")
            .field("n_workers", &self.n_workers())
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl Evaluator for ParallelEvaluator {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn evaluate_batch(
        &self,
        problem: &Problem,
        batch: &[Vec<f64>],
    ) -> Vec<Result<Target, EvaluationError>> {
        let objective = problem.objective();
        let n_dims = problem.n_dims();
        let run = || -> Vec<Result<Target, EvaluationError>> {
            batch
                .par_iter()
                .map(|solution| evaluate_checked(objective, n_dims, solution))
                .collect()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Evaluator for a configured mode.
pub fn evaluator_for(
    mode: EvaluationMode,
    n_workers: Option<usize>,
) -> Result<Box<dyn Evaluator>, rayon::ThreadPoolBuildError> {
    Ok(match (mode, n_workers) {
        (EvaluationMode::Sequential, _) => Box::new(SequentialEvaluator),
        (EvaluationMode::Parallel, None) => Box::new(ParallelEvaluator::new()),
        (EvaluationMode::Parallel, Some(n)) => Box::new(ParallelEvaluator::with_workers(n)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{Bounds, FallibleObjective};
    use crate::schema::Direction;

    fn failing_problem() -> Problem {
        let bounds = Bounds::symmetric(2, 5.0).unwrap();
        let objective = FallibleObjective(|x: &[f64]| {
            if x[0] > 0.0 {
                Err("positive first coordinate".to_string())
            } else {
                Ok(x[0] * x[0] + x[1] * x[1])
            }
        });
        Problem::new(bounds, Direction::Minimize, objective)
    }

    fn batch() -> Vec<Vec<f64>> {
        (0..32)
            .map(|i| vec![i as f64 * 0.25 - 4.0, 1.0])
            .collect()
    }

    #[test]
    fn test_sequential_reports_per_candidate() {
        let problem = failing_problem();
        let results = SequentialEvaluator.evaluate_batch(&problem, &batch());
        assert_eq!(results.len(), 32);
        assert!(results[0].is_ok());
        assert!(results[31].is_err());
        assert_eq!(results[0].as_ref().unwrap().objective, 17.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = failing_problem();
        let seq = SequentialEvaluator.evaluate_batch(&problem, &batch());
        let par = ParallelEvaluator::with_workers(3)
            .unwrap()
            .evaluate_batch(&problem, &batch());
        assert_eq!(seq, par);

        let global = ParallelEvaluator::new().evaluate_batch(&problem, &batch());
        assert_eq!(seq, global);
    }

    #[test]
    fn test_evaluator_for() {
        let e = evaluator_for(EvaluationMode::Sequential, Some(4)).unwrap();
        assert_eq!(e.name(), "sequential");
        let e = evaluator_for(EvaluationMode::Parallel, Some(2)).unwrap();
        assert_eq!(e.name(), "parallel");
    }
}
