//! Quick optimizer performance test

use ant_lion::{
    AntLionOptimizer, Bounds, Problem,
    compute::benchmarks,
    schema::{Direction, EvaluationMode, OptimizerConfig, WalkStrategy},
};
use std::time::Instant;

fn main() {
    println!("=== Walk Strategy Comparison (sphere, 10 dims) ===\n");

    let bounds = Bounds::symmetric(10, 10.0).unwrap();
    let problem = Problem::new(bounds, Direction::Minimize, benchmarks::sphere).with_name("sphere");

    for walk in [WalkStrategy::Sequential, WalkStrategy::Batch] {
        let config = OptimizerConfig::new(200, 30).with_seed(42).with_walk(walk);

        let start = Instant::now();
        let mut optimizer = AntLionOptimizer::new(config).unwrap();
        let result = optimizer.solve(&problem).unwrap();
        let elapsed = start.elapsed();

        println!("{:?}:", walk);
        println!("  Epochs:         {}", result.stats.epochs);
        println!("  Evaluations:    {}", result.stats.evaluations);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Best fitness:   {:.6e}", result.best.fitness());
        println!();
    }

    println!("=== Evaluation Mode Scalability (expensive objective) ===\n");

    // Simulate a costly objective so parallel evaluation has something to win.
    let slow = Problem::new(
        Bounds::symmetric(5, 5.0).unwrap(),
        Direction::Minimize,
        |x: &[f64]| -> f64 {
            (0..20_000).fold(benchmarks::rastrigin(x), |acc, i| {
                acc + ((i as f64) * 1e-9).sin() * 1e-12
            })
        },
    );

    for pop_size in [10, 40, 160] {
        for mode in [EvaluationMode::Sequential, EvaluationMode::Parallel] {
            let config = OptimizerConfig::new(20, pop_size).with_seed(42).with_mode(mode);

            let start = Instant::now();
            let mut optimizer = AntLionOptimizer::new(config).unwrap();
            let result = optimizer.solve(&slow).unwrap();
            let elapsed = start.elapsed();

            println!(
                "Population {} ({:?}): {} evals in {:.2}s ({:.1} evals/sec)",
                pop_size,
                mode,
                result.stats.evaluations,
                elapsed.as_secs_f64(),
                result.stats.evaluations as f64 / elapsed.as_secs_f64()
            );
        }
    }
}
