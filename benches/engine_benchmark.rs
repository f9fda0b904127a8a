/*!
 * Engine Benchmarks
 *
 * Compare sequential, counter-synchronized and streaming strategies
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use josephus_engine::{Engine, EngineConfig, Strategy};

fn bench_strategies(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).expect("worker pool");
    let mut group = c.benchmark_group("strategies");

    for n in [64usize, 512] {
        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), n), &n, |b, &n| {
                b.iter(|| engine.run(strategy, black_box(n), black_box(3)).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("counter_workers");

    for workers in [1usize, 2, 4] {
        let engine = Engine::new(EngineConfig::default().with_worker_threads(workers)).expect("worker pool");
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| engine.concurrent_counter(black_box(256), black_box(5)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_worker_counts);
criterion_main!(benches);
