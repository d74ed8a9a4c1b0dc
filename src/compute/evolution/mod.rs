//! Ant Lion search: selection, random walks, evaluation, and the engine.
//!
//! # Overview
//!
//! One epoch of the search consists of:
//!
//! - **Roulette selection** (`roulette`): pick an antlion with probability
//!   proportional to a fitness-derived weight
//! - **Random walks** (`walk`): build a bounded walk around the selected
//!   antlion and another around the elite, both shrinking as the run ages
//! - **Evaluation** (`evaluator`): score the new ants, sequentially or on a
//!   rayon pool
//! - **Merge** (`search`): keep the best `pop_size` of ants and antlions and
//!   put the elite back into the worst slot
//!
//! Every random draw comes from one [`SearchRng`], so a seeded run is
//! reproducible regardless of evaluation mode.
//!
//! # Example
//!
//! ```rust,no_run
//! use ant_lion::compute::{Bounds, Problem, benchmarks};
//! use ant_lion::compute::evolution::AntLionOptimizer;
//! use ant_lion::schema::{Direction, OptimizerConfig};
//!
//! let bounds = Bounds::symmetric(5, 10.0).unwrap();
//! let problem = Problem::new(bounds, Direction::Minimize, benchmarks::sphere);
//!
//! let config = OptimizerConfig::new(50, 20).with_seed(42);
//! let mut optimizer = AntLionOptimizer::new(config).unwrap();
//! let result = optimizer.run_with_callback(&problem, |progress| {
//!     println!("Epoch {}: best fitness = {:.3e}",
//!         progress.epoch, progress.best_fitness);
//! }).unwrap();
//!
//! println!("Best solution: {:?}", result.best.solution);
//! ```
//!
//! # Walk strategies
//!
//! - `SequentialWalk`: one dimension at a time
//! - `BatchWalk`: all dimensions per time step, rescaled together

mod evaluator;
mod rng;
mod roulette;
mod search;
mod walk;

pub use evaluator::{Evaluator, ParallelEvaluator, SequentialEvaluator, evaluator_for};
pub use rng::SearchRng;
pub use roulette::roulette_index;
pub use search::{AntLionOptimizer, OptimizerError};
pub use walk::{
    BatchWalk, RandomWalk, SequentialWalk, WalkInterval, WalkMatrix, shrink_ratio, walk_for,
};
