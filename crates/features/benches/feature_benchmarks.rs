//! Benchmarks for pricewise-features engineering.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pricewise_features::{EngineConfig, FeatureEngine};
use pricewise_primitives::{Month, NormalizedRow};
use rand::Rng;

fn random_panel(n_commodities: usize, n_markets: usize, n_months: usize) -> Vec<NormalizedRow> {
    let mut rng = rand::thread_rng();
    let start = Month::new(2010, 1).unwrap();
    let mut rows = Vec::with_capacity(n_commodities * n_markets * n_months);
    for c in 0..n_commodities {
        for m in 0..n_markets {
            let mut price = rng.gen_range(1_000.0..50_000.0);
            for t in 0..n_months {
                price *= 1.0 + rng.gen_range(-0.05..0.06);
                let date = start.offset(t as i32).unwrap();
                rows.push(NormalizedRow::new(date, format!("commodity_{c}"), format!("market_{m}"), price));
            }
        }
    }
    rows
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_engine");
    group.sample_size(20);

    let scenarios = [
        (3, 5, 60, "small_panel"),
        (3, 20, 120, "medium_panel"),
        (10, 50, 120, "large_panel"),
    ];

    for (n_commodities, n_markets, n_months, name) in scenarios {
        let rows = random_panel(n_commodities, n_markets, n_months);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::new("scenario", name), &rows, |b, rows| {
            let engine = FeatureEngine::new();
            b.iter(|| black_box(engine.run(black_box(rows)).unwrap()));
        });
    }

    group.finish();
}

fn bench_diagnostics(c: &mut Criterion) {
    let rows = random_panel(3, 20, 120);
    let config = EngineConfig { diagnostics: true, ..EngineConfig::default() };
    let engine = FeatureEngine::with_config(config).unwrap();

    c.bench_function("feature_engine_with_smoothed_path", |b| {
        b.iter(|| black_box(engine.run(black_box(&rows)).unwrap()));
    });
}

criterion_group!(benches, bench_engine, bench_diagnostics);
criterion_main!(benches);
