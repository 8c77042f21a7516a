use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chromapeak::numeric::Gaussian;
use chromapeak::prelude::*;

/// Chromatogram of `peaks` evenly spaced Gaussians on a sloped baseline
fn synthetic_trace(samples: usize, peaks: usize) -> Trace {
    let step = 70.0 / samples as f64;
    let spacing = 50.0 / (peaks + 1) as f64;
    let components: Vec<Gaussian> = (1..=peaks)
        .map(|k| Gaussian::new(200.0 + 100.0 * (k % 7) as f64, 10.0 + k as f64 * spacing, 0.2))
        .collect();
    let time: Vec<f64> = (0..samples).map(|i| i as f64 * step).collect();
    let intensity = time
        .iter()
        .map(|&t| 20.0 + 0.2 * t + components.iter().map(|g| g.evaluate(t)).sum::<f64>())
        .collect();
    Trace::new(time, intensity).unwrap()
}

/// Benchmark the full fit/subtract loop for growing peak counts
fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_detection");
    let config = AnalysisConfig::default();

    for peaks in [5, 20, 50] {
        let trace = synthetic_trace(1400, peaks);
        group.throughput(Throughput::Elements(peaks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}peaks", peaks)), &trace, |b, trace| {
            let detector = PeakDetector::new(&config.window, &config.background, &config.peaks);
            b.iter(|| {
                let detection = detector.detect(black_box(trace)).unwrap();
                black_box(detection);
            });
        });
    }

    group.finish();
}

/// Benchmark baseline correction for growing trace lengths
fn bench_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("baseline_correction");
    let config = AnalysisConfig::default();

    for samples in [1_400, 14_000, 140_000] {
        let trace = synthetic_trace(samples, 10);
        let baseline = BaselineConfig {
            points: samples / 14,
            ..config.baseline.clone()
        };
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &trace, |b, trace| {
            b.iter(|| {
                let corrected = correct_baseline(black_box(trace), &config.window, &baseline).unwrap();
                black_box(corrected);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_detection, bench_baseline);
criterion_main!(benches);
