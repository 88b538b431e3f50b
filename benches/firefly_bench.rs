//! Criterion benchmarks for the firefly optimizer.
//!
//! The attraction step is quadratic in colony size, so the groups below
//! scale population and dimensions separately.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_firefly::firefly::attraction::{attract, random_walk, AttractionParams};
use u_firefly::objective::benchmarks::{rosenbrock, sphere};
use u_firefly::random::create_rng;
use u_firefly::{FireflyConfig, FireflyRunner, Swarm};

fn bench_attraction_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("attraction_step");
    group.sample_size(10);

    for &pop in &[50usize, 200, 500] {
        let mut rng = create_rng(Some(42));
        let swarm = Swarm::uniform(4, pop, 12, -4.0, 4.0, &mut rng);
        let costs = swarm.evaluate(&rosenbrock, false).unwrap();
        let walk = random_walk(swarm.as_slice().len(), 0.1, -4.0, 4.0, &mut rng);
        let params = AttractionParams {
            beta0: 2.0,
            gamma: 1.0,
            lower_bound: -4.0,
            upper_bound: 4.0,
        };

        for parallel in [false, true] {
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, pop), &pop, |b, _| {
                b.iter(|| {
                    black_box(attract(
                        black_box(&swarm),
                        black_box(&costs),
                        black_box(&walk),
                        &params,
                        parallel,
                    ))
                })
            });
        }
    }
    group.finish();
}

fn bench_run_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_sphere");
    group.sample_size(10);

    for &dim in &[2usize, 8, 32] {
        let config = FireflyConfig::default()
            .with_steps(50)
            .with_colonies(2)
            .with_population_size(50)
            .with_dimensions(dim)
            .with_migrate_every(10)
            .with_breeding_sizes(2, 1)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &config, |b, c| {
            b.iter(|| black_box(FireflyRunner::run(&sphere, black_box(c)).unwrap()))
        });
    }
    group.finish();
}

fn bench_run_rosenbrock_breeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_rosenbrock_breeding");
    group.sample_size(10);

    for &(pop, children) in &[(50usize, 25usize), (100, 50)] {
        let config = FireflyConfig::default()
            .with_steps(50)
            .with_colonies(4)
            .with_population_size(pop)
            .with_dimensions(12)
            .with_migrate_every(10)
            .with_genetic_algorithm(10, pop / 10, children)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}_c{children}"), pop),
            &config,
            |b, c| b.iter(|| black_box(FireflyRunner::run(&rosenbrock, black_box(c)).unwrap())),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_attraction_step,
    bench_run_sphere,
    bench_run_rosenbrock_breeding
);
criterion_main!(benches);
