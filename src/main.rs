//! Ant Lion CLI - Run an optimization from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::process;

use ant_lion::{
    compute::{AntLionOptimizer, Problem},
    schema::{Benchmark, OptimizerConfig, ProblemConfig, RunConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!();
        eprintln!("Run the Ant Lion optimizer from a JSON run configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to run configuration file");
        eprintln!();
        eprintln!("An example configuration is printed with the --example flag.");
        process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let run = RunConfig::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", config_path.display(), e);
        process::exit(1);
    });

    let problem = Problem::from_config(&run.problem).unwrap_or_else(|e| {
        eprintln!("Invalid problem: {}", e);
        process::exit(1);
    });

    let optimizer_config = &run.optimizer;
    println!("Ant Lion Optimizer");
    println!("==================");
    println!(
        "Problem: {} ({:?}, {} dims, {:?})",
        problem.name(),
        run.problem.objective,
        problem.n_dims(),
        problem.direction()
    );
    println!(
        "Epochs: {}, population: {}",
        optimizer_config.epoch, optimizer_config.pop_size
    );
    println!(
        "Walk: {:?}, evaluation: {:?}",
        optimizer_config.walk, optimizer_config.mode
    );
    println!();

    let mut optimizer = AntLionOptimizer::new(run.optimizer.clone()).unwrap_or_else(|e| {
        eprintln!("Error creating optimizer: {}", e);
        process::exit(1);
    });

    let report_every = (optimizer_config.epoch / 10).max(1);
    let result = optimizer
        .run_with_callback(&problem, |progress| {
            if progress.epoch > 0 && progress.epoch % report_every == 0 {
                println!(
                    "  Epoch {}/{}: best={:.6e}, current={:.6e}, evals={}, {:.2}s",
                    progress.epoch,
                    progress.total_epochs,
                    progress.best_fitness,
                    progress.current_best,
                    progress.evaluations,
                    progress.elapsed_seconds
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Optimization failed: {}", e);
            process::exit(1);
        });

    println!();
    println!("Result ({:?}):", result.stats.stop_reason);
    println!("  Best fitness: {:.6e}", result.best.fitness());
    println!("  Epochs: {}", result.stats.epochs);
    println!(
        "  Evaluations: {} ({} failed)",
        result.stats.evaluations, result.stats.failed_evaluations
    );
    println!("  Time: {:.2}s", result.stats.elapsed_seconds);
    println!("  Solution:");
    for (i, x) in result.best.solution.iter().enumerate() {
        println!("    x[{}] = {:.6}", i, x);
    }
}

fn print_example_config() {
    let run = RunConfig {
        problem: ProblemConfig::symmetric(Benchmark::Sphere, 5, 10.0),
        optimizer: OptimizerConfig::new(50, 20).with_seed(42),
    };

    match serde_json::to_string_pretty(&run) {
        Ok(json) => {
            println!("Example configuration (config.json):");
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error serializing example: {}", e);
            process::exit(1);
        }
    }
}
