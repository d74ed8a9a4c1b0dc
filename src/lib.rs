//! Ant Lion Optimizer - Population-based continuous optimization.
//!
//! This crate implements the Ant Lion Optimizer (ALO), a stochastic search
//! over a box-bounded real vector space. Ants walk randomly around antlions
//! chosen by roulette-wheel selection and around the elite; the walks shrink
//! as the run progresses, pulling the population toward good regions.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, problem description, and result types
//! - `compute`: Bounds, objectives, benchmarks, and the search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use ant_lion::{
//!     compute::{AntLionOptimizer, Bounds, Problem, benchmarks},
//!     schema::{Direction, OptimizerConfig, WalkStrategy},
//! };
//!
//! // Minimize the sphere function over [-10, 10]^5
//! let bounds = Bounds::symmetric(5, 10.0).unwrap();
//! let problem = Problem::new(bounds, Direction::Minimize, benchmarks::sphere);
//!
//! // Create configuration
//! let config = OptimizerConfig::new(50, 20)
//!     .with_seed(42)
//!     .with_walk(WalkStrategy::Batch);
//!
//! // Create optimizer and run
//! let mut optimizer = AntLionOptimizer::new(config).unwrap();
//! let result = optimizer.solve(&problem).unwrap();
//!
//! println!("Best fitness after {} epochs: {}", result.stats.epochs, result.best.fitness());
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{AntLionOptimizer, Bounds, Objective, OptimizerError, Problem};
pub use schema::{Direction, OptimizationResult, OptimizerConfig, RunConfig};
