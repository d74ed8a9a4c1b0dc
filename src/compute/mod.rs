//! Compute module - Problems, bounds, benchmarks, and the search itself.

pub mod benchmarks;
mod bounds;
pub mod evolution;
mod problem;

pub use bounds::*;
pub use evolution::{AntLionOptimizer, OptimizerError};
pub use problem::*;
