//! Benchmarks for random-walk generation and full optimizer runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use ant_lion::{
    compute::{
        AntLionOptimizer, Bounds, Problem, benchmarks,
        evolution::{RandomWalk, SearchRng, walk_for},
    },
    schema::{Direction, OptimizerConfig, WalkStrategy},
};

fn bench_walk_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_generation");

    for strategy in [WalkStrategy::Sequential, WalkStrategy::Batch] {
        for n_dims in [5, 30, 100] {
            let bounds = Bounds::symmetric(n_dims, 10.0).unwrap();
            let reference = vec![1.0; n_dims];
            let walk = walk_for(strategy);
            let mut rng = SearchRng::new(42);

            group.bench_with_input(
                BenchmarkId::new(walk.name(), format!("{}d", n_dims)),
                &n_dims,
                |b, _| {
                    b.iter(|| {
                        walk.generate(
                            black_box(&reference),
                            black_box(300),
                            1000,
                            &bounds,
                            &mut rng,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for pop_size in [10, 50] {
        let bounds = Bounds::symmetric(10, 10.0).unwrap();
        let problem = Problem::new(bounds, Direction::Minimize, benchmarks::rastrigin);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("pop_{}", pop_size)),
            &pop_size,
            |b, &pop_size| {
                b.iter(|| {
                    let config = OptimizerConfig::new(50, pop_size).with_seed(7);
                    let mut optimizer = AntLionOptimizer::new(config).unwrap();
                    optimizer.solve(black_box(&problem)).unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_walk_generation, bench_solve);
criterion_main!(benches);
