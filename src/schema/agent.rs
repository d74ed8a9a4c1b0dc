//! Population member types.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Evaluated objective of a solution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Target {
    /// Raw objective value returned by the objective function.
    pub objective: f64,
    /// Fitness used for ranking. Equal to the objective for single-objective problems.
    pub fitness: f64,
}

impl Target {
    /// Target for a single-objective value.
    pub fn new(objective: f64) -> Self {
        Self {
            objective,
            fitness: objective,
        }
    }
}

/// An evaluated candidate solution.
///
/// Agents are never mutated after evaluation; each generation builds new ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    /// Unique identifier within a run.
    pub id: u64,
    /// Position in the search space.
    pub solution: Vec<f64>,
    /// Evaluated objective.
    pub target: Target,
    /// Epoch this agent was created (0 for the initial population).
    pub epoch: usize,
}

impl Agent {
    /// Fitness used for ranking.
    #[inline]
    pub fn fitness(&self) -> f64 {
        self.target.fitness
    }

    /// Whether this agent is strictly better than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Agent, direction: Direction) -> bool {
        direction.is_better(self.fitness(), other.fitness())
    }
}

/// Sort agents best first.
pub fn sort_population(population: &mut [Agent], direction: Direction) {
    population.sort_by(|a, b| direction.compare(a.fitness(), b.fitness()));
}
