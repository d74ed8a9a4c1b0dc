//! End-to-end and property tests for the Ant Lion optimizer.

use std::io::Write;

use proptest::prelude::*;

use ant_lion::compute::evolution::{
    BatchWalk, RandomWalk, SearchRng, SequentialWalk, WalkInterval, roulette_index, shrink_ratio,
};
use ant_lion::compute::{AntLionOptimizer, Bounds, Problem, benchmarks};
use ant_lion::schema::{Direction, EvaluationMode, OptimizerConfig, RunConfig, WalkStrategy};

fn sphere_problem() -> Problem {
    let bounds = Bounds::symmetric(5, 10.0).unwrap();
    Problem::new(bounds, Direction::Minimize, benchmarks::sphere).with_name("sphere")
}

fn run_sphere(seed: u64, walk: WalkStrategy) -> ant_lion::OptimizationResult {
    let config = OptimizerConfig::new(50, 20).with_seed(seed).with_walk(walk);
    AntLionOptimizer::new(config)
        .unwrap()
        .solve(&sphere_problem())
        .unwrap()
}

#[test]
fn sphere_converges_below_threshold() {
    for walk in [WalkStrategy::Sequential, WalkStrategy::Batch] {
        let mut below = 0;
        for seed in 0..5 {
            let result = run_sphere(seed, walk);
            let trace = &result.history.global_best;
            assert_eq!(trace.len(), 50);
            assert!(
                result.best.fitness() < trace[0],
                "{walk:?} seed {seed}: no improvement after epoch 1 ({} vs {})",
                result.best.fitness(),
                trace[0]
            );
            if result.best.fitness() < 1.0 {
                below += 1;
            }
        }
        assert!(below >= 3, "{walk:?}: only {below}/5 runs reached < 1.0");
    }
}

#[test]
fn surviving_agents_stay_in_bounds() {
    let problem = sphere_problem();
    let mut config = OptimizerConfig::new(25, 10).with_seed(3);
    config.save_population = true;
    let result = AntLionOptimizer::new(config).unwrap().solve(&problem).unwrap();

    for population in &result.history.populations {
        assert_eq!(population.len(), 10);
        for agent in population {
            assert!(problem.bounds().contains(&agent.solution));
        }
    }
}

#[test]
fn elite_never_regresses() {
    for walk in [WalkStrategy::Sequential, WalkStrategy::Batch] {
        let result = run_sphere(11, walk);
        let trace = &result.history.global_best;
        assert!(trace.windows(2).all(|w| w[1] <= w[0]));
        for (best, current) in trace.iter().zip(&result.history.current_best) {
            // The elite is always kept in the population.
            assert_eq!(best, current);
        }
    }
}

#[test]
fn seeded_runs_are_identical() {
    let a = run_sphere(99, WalkStrategy::Sequential);
    let b = run_sphere(99, WalkStrategy::Sequential);
    assert_eq!(a.history.global_best, b.history.global_best);
    assert_eq!(a.best, b.best);

    let config = OptimizerConfig::new(50, 20)
        .with_seed(99)
        .with_mode(EvaluationMode::Parallel);
    let c = AntLionOptimizer::new(config)
        .unwrap()
        .solve(&sphere_problem())
        .unwrap();
    assert_eq!(a.history.global_best, c.history.global_best);
}

#[test]
fn run_config_from_file() {
    let json = r#"{
        "problem": {
            "name": "shifted",
            "objective": "rastrigin",
            "lower": [-5.12, -5.12, -5.12],
            "upper": [5.12, 5.12, 5.12],
            "direction": "min"
        },
        "optimizer": {
            "epoch": 20,
            "pop_size": 10,
            "walk": "batch",
            "random_seed": 5
        }
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let run = RunConfig::from_file(file.path()).unwrap();
    assert_eq!(run.optimizer.walk, WalkStrategy::Batch);

    let problem = Problem::from_config(&run.problem).unwrap();
    assert_eq!(problem.name(), "shifted");
    let result = AntLionOptimizer::new(run.optimizer)
        .unwrap()
        .solve(&problem)
        .unwrap();
    assert_eq!(result.stats.epochs, 20);
    assert!(problem.bounds().contains(&result.best.solution));
}

#[test]
fn run_config_rejects_out_of_range() {
    let json = r#"{
        "problem": {"objective": "sphere", "lower": [-1.0], "upper": [1.0]},
        "optimizer": {"epoch": 10, "pop_size": 3}
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    assert!(RunConfig::from_file(file.path()).is_err());
}

#[test]
fn roulette_uniform_under_equal_fitness() {
    let mut rng = SearchRng::new(2024);
    let fitness = vec![0.5; 8];
    let mut counts = [0usize; 8];
    let draws = 40_000;
    for _ in 0..draws {
        counts[roulette_index(&fitness, Direction::Maximize, &mut rng)] += 1;
    }
    let expected = draws as f64 / 8.0;
    for c in counts {
        assert!((c as f64 - expected).abs() < 0.1 * expected, "{counts:?}");
    }
}

proptest! {
    #[test]
    fn roulette_index_in_range(
        fitness in prop::collection::vec(-1e6f64..1e6, 1..50),
        maximize in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let direction = if maximize { Direction::Maximize } else { Direction::Minimize };
        let mut rng = SearchRng::new(seed);
        let idx = roulette_index(&fitness, direction, &mut rng);
        prop_assert!(idx < fitness.len());
    }

    #[test]
    fn shrink_ratio_monotone_and_unit_early(max_epoch in 1usize..5000, a in 0usize..5000, b in 0usize..5000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(shrink_ratio(lo, max_epoch) <= shrink_ratio(hi, max_epoch));
        if lo * 10 <= max_epoch {
            prop_assert_eq!(shrink_ratio(lo, max_epoch), 1.0);
        }
    }

    #[test]
    fn walks_stay_in_recentered_interval(
        reference in prop::collection::vec(-10.0f64..10.0, 1..6),
        epoch_fraction in 0.0f64..1.0,
        horizon in 1usize..200,
        batch in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let n_dims = reference.len();
        let bounds = Bounds::symmetric(n_dims, 10.0).unwrap();
        let epoch = ((epoch_fraction * horizon as f64) as usize).max(1);
        let mut rng = SearchRng::new(seed);
        let interval = WalkInterval::around(&reference, epoch, horizon, &bounds, &mut rng);

        let walk: Box<dyn RandomWalk> = if batch { Box::new(BatchWalk) } else { Box::new(SequentialWalk) };
        let matrix = walk.walk(&interval, horizon, &mut rng);
        prop_assert_eq!(matrix.n_dims(), n_dims);
        prop_assert_eq!(matrix.horizon(), horizon);
        for k in 0..n_dims {
            for &x in matrix.row(k) {
                prop_assert!(x.is_finite());
                prop_assert!(interval.contains(k, x, 1e-9));
            }
        }
    }

    #[test]
    fn corrected_vectors_inside_bounds(
        raw in prop::collection::vec(prop_oneof![
            -1e3f64..1e3,
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
        ], 4),
    ) {
        let bounds = Bounds::new(vec![-1.0, 0.0, -5.0, 2.0], vec![1.0, 3.0, -4.0, 2.0]).unwrap();
        let fixed = bounds.correct(&raw);
        prop_assert!(bounds.contains(&fixed));
    }
}
