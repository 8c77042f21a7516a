use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chromapeak::calibration::CalibrationModelSelector;
use chromapeak::prelude::*;

/// Time pairs following a mild quadratic drift
fn drifting_pairs(count: usize) -> Vec<TimePair> {
    (0..count)
        .map(|i| {
            let observed_time = 12.0 + i as f64 * 45.0 / count as f64;
            TimePair {
                expected_time: 0.002 * observed_time * observed_time + 0.97 * observed_time - 0.3,
                observed_time,
            }
        })
        .collect()
}

/// Benchmark model selection over the candidate ladder
fn bench_model_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_selection");
    let config = CalibrationConfig::default();

    for count in [4, 8, 16] {
        let pairs = drifting_pairs(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &pairs, |b, pairs| {
            let selector = CalibrationModelSelector::new(&config);
            b.iter(|| {
                let selection = selector
                    .select(black_box(pairs), 10.0, 60.0)
                    .unwrap();
                black_box(selection);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_model_selection);
criterion_main!(benches);
