//! Schema module - Configuration, problem, and result types for optimizer runs.

mod agent;
mod config;
mod history;
mod problem;

pub use agent::*;
pub use config::*;
pub use history::*;
pub use problem::*;
