//! Objective functions and the problem they are optimized over.

use std::fmt;

use crate::schema::{Direction, ProblemConfig, Target};

use super::Bounds;

/// A scalar objective over real vectors.
///
/// Any `Fn(&[f64]) -> f64` closure or function is an objective. Implement the
/// trait directly when evaluation can fail.
pub trait Objective: Send + Sync {
    /// Evaluate a solution.
    fn evaluate(&self, solution: &[f64]) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, solution: &[f64]) -> Result<f64, EvaluationError> {
        Ok(self(solution))
    }
}

/// Adapter for closures that report their own failures.
pub struct FallibleObjective<F>(pub F);

impl<F> Objective for FallibleObjective<F>
where
    F: Fn(&[f64]) -> Result<f64, String> + Send + Sync,
{
    fn evaluate(&self, solution: &[f64]) -> Result<f64, EvaluationError> {
        (self.0)(solution).map_err(EvaluationError::Failed)
    }
}

/// A solvable problem: bounds, direction, and objective.
pub struct Problem {
    name: String,
    bounds: Bounds,
    direction: Direction,
    objective: Box<dyn Objective>,
}

impl Problem {
    /// Create a problem from validated bounds and an objective.
    pub fn new(bounds: Bounds, direction: Direction, objective: impl Objective + 'static) -> Self {
        Self {
            name: "problem".to_string(),
            bounds,
            direction,
            objective: Box::new(objective),
        }
    }

    /// Build a problem from its serializable description.
    pub fn from_config(config: &ProblemConfig) -> Result<Self, ProblemError> {
        let bounds = Bounds::new(config.lower.clone(), config.upper.clone())?;
        Ok(Self::new(bounds, config.direction, config.objective).with_name(&config.name))
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn n_dims(&self) -> usize {
        self.bounds.n_dims()
    }

    pub fn objective(&self) -> &dyn Objective {
        self.objective.as_ref()
    }

    /// Evaluate a solution, rejecting wrong lengths and non-finite values.
    pub fn evaluate(&self, solution: &[f64]) -> Result<Target, EvaluationError> {
        evaluate_checked(self.objective(), self.n_dims(), solution)
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Evaluate through an objective with the length and finiteness checks applied.
pub fn evaluate_checked(
    objective: &dyn Objective,
    n_dims: usize,
    solution: &[f64],
) -> Result<Target, EvaluationError> {
    if solution.len() != n_dims {
        return Err(EvaluationError::DimensionMismatch {
            expected: n_dims,
            actual: solution.len(),
        });
    }
    let value = objective.evaluate(solution)?;
    if !value.is_finite() {
        return Err(EvaluationError::NonFinite(value));
    }
    Ok(Target::new(value))
}

/// Problem setup errors.
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    #[error("Bounds must have at least one dimension")]
    EmptyBounds,
    #[error("Lower bound has {lower} dimensions but upper bound has {upper}")]
    LengthMismatch { lower: usize, upper: usize },
    #[error("Bound in dimension {dim} is not finite")]
    NonFiniteBound { dim: usize },
    #[error("Lower bound {lower} exceeds upper bound {upper} in dimension {dim}")]
    InvertedBounds { dim: usize, lower: f64, upper: f64 },
    #[error("Bounds in dimension {dim} are too large to sample without overflow")]
    RangeOverflow { dim: usize },
}

/// Failure evaluating a single candidate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Objective returned non-finite value {0}")]
    NonFinite(f64),
    #[error("Solution has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Objective failed: {0}")]
    Failed(String),
    #[error("Evaluator returned no result for this candidate")]
    MissingResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Benchmark;

    fn sum(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_closure_objective() {
        let bounds = Bounds::symmetric(2, 1.0).unwrap();
        let problem = Problem::new(bounds, Direction::Minimize, sum);
        let target = problem.evaluate(&[0.25, 0.5]).unwrap();
        assert_eq!(target.objective, 0.75);
        assert_eq!(target.fitness, 0.75);
    }

    #[test]
    fn test_non_finite_rejected() {
        let bounds = Bounds::symmetric(1, 1.0).unwrap();
        let problem = Problem::new(bounds, Direction::Minimize, |x: &[f64]| -> f64 {
            1.0 / x[0]
        });
        assert!(matches!(
            problem.evaluate(&[0.0]),
            Err(EvaluationError::NonFinite(_))
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        let bounds = Bounds::symmetric(3, 1.0).unwrap();
        let problem = Problem::new(bounds, Direction::Minimize, sum);
        assert_eq!(
            problem.evaluate(&[1.0]),
            Err(EvaluationError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_fallible_objective() {
        let bounds = Bounds::symmetric(1, 1.0).unwrap();
        let objective = FallibleObjective(|x: &[f64]| {
            if x[0] < 0.0 {
                Err("negative input".to_string())
            } else {
                Ok(x[0])
            }
        });
        let problem = Problem::new(bounds, Direction::Minimize, objective);
        assert!(problem.evaluate(&[0.5]).is_ok());
        assert_eq!(
            problem.evaluate(&[-0.5]),
            Err(EvaluationError::Failed("negative input".into()))
        );
    }

    #[test]
    fn test_from_config() {
        let config = ProblemConfig::symmetric(Benchmark::Sphere, 4, 5.0);
        let problem = Problem::from_config(&config).unwrap();
        assert_eq!(problem.n_dims(), 4);
        assert_eq!(problem.name(), "sphere");

        let mut bad = config.clone();
        bad.upper[2] = -6.0;
        assert!(matches!(
            Problem::from_config(&bad),
            Err(ProblemError::InvertedBounds { dim: 2, .. })
        ));
    }
}
