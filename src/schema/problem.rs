//! Problem description types: direction, named objectives, and bounds.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Optimization direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smaller fitness is better.
    #[default]
    #[serde(alias = "min")]
    Minimize,
    /// Larger fitness is better.
    #[serde(alias = "max")]
    Maximize,
}

impl Direction {
    /// Whether fitness `a` is strictly better than `b`.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// Ordering that places better fitness first.
    #[inline]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Direction::Minimize => a.total_cmp(&b),
            Direction::Maximize => b.total_cmp(&a),
        }
    }
}

/// Built-in benchmark objectives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Benchmark {
    /// Sum of squares. Minimum 0 at the origin.
    Sphere,
    /// Rosenbrock valley. Minimum 0 at (1, ..., 1).
    Rosenbrock,
    /// Rastrigin lattice of local minima. Minimum 0 at the origin.
    Rastrigin,
    /// Ackley. Minimum 0 at the origin.
    Ackley,
    /// Griewank. Minimum 0 at the origin.
    Griewank,
    /// Schwefel. Minimum near 0 at (420.9687, ..., 420.9687).
    Schwefel,
}

/// Serializable problem description used by run configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Display name used in logs.
    #[serde(default = "default_problem_name")]
    pub name: String,
    /// Objective to optimize.
    pub objective: Benchmark,
    /// Lower bound per dimension.
    pub lower: Vec<f64>,
    /// Upper bound per dimension.
    pub upper: Vec<f64>,
    /// Optimization direction.
    #[serde(default)]
    pub direction: Direction,
}

fn default_problem_name() -> String {
    "problem".to_string()
}

impl ProblemConfig {
    /// Minimize `objective` over the box `[-bound, bound]^n_dims`.
    pub fn symmetric(objective: Benchmark, n_dims: usize, bound: f64) -> Self {
        Self {
            name: format!("{objective:?}").to_lowercase(),
            objective,
            lower: vec![-bound; n_dims],
            upper: vec![bound; n_dims],
            direction: Direction::Minimize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_comparisons() {
        assert!(Direction::Minimize.is_better(1.0, 2.0));
        assert!(!Direction::Minimize.is_better(2.0, 2.0));
        assert!(Direction::Maximize.is_better(3.0, 2.0));
        assert_eq!(Direction::Minimize.compare(1.0, 2.0), Ordering::Less);
        assert_eq!(Direction::Maximize.compare(1.0, 2.0), Ordering::Greater);
    }

    #[test]
    fn test_direction_aliases() {
        let d: Direction = serde_json::from_str("\"min\"").unwrap();
        assert_eq!(d, Direction::Minimize);
        let d: Direction = serde_json::from_str("\"maximize\"").unwrap();
        assert_eq!(d, Direction::Maximize);
    }

    #[test]
    fn test_problem_config_json() {
        let json = r#"{
            "objective": "rastrigin",
            "lower": [-5.12, -5.12],
            "upper": [5.12, 5.12]
        }"#;
        let config: ProblemConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.objective, Benchmark::Rastrigin);
        assert_eq!(config.direction, Direction::Minimize);
        assert_eq!(config.name, "problem");
    }

    #[test]
    fn test_symmetric() {
        let config = ProblemConfig::symmetric(Benchmark::Sphere, 3, 10.0);
        assert_eq!(config.lower, vec![-10.0; 3]);
        assert_eq!(config.upper, vec![10.0; 3]);
        assert_eq!(config.name, "sphere");
    }
}
