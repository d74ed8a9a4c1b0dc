//! Standard benchmark objectives for exercising the optimizer.

use std::f64::consts::{E, PI};

use crate::schema::Benchmark;

use super::{EvaluationError, Objective};

/// Sum of squares.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock valley.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Rastrigin function.
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function.
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Griewank function.
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - prod + 1.0
}

/// Schwefel function.
pub fn schwefel(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    418.9829 * n - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

impl Benchmark {
    /// Evaluate the benchmark at `x`.
    pub fn value(self, x: &[f64]) -> f64 {
        match self {
            Benchmark::Sphere => sphere(x),
            Benchmark::Rosenbrock => rosenbrock(x),
            Benchmark::Rastrigin => rastrigin(x),
            Benchmark::Ackley => ackley(x),
            Benchmark::Griewank => griewank(x),
            Benchmark::Schwefel => schwefel(x),
        }
    }
}

impl Objective for Benchmark {
    fn evaluate(&self, solution: &[f64]) -> Result<f64, EvaluationError> {
        Ok(self.value(solution))
    }
}
