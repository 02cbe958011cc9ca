use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use scaling_rs::data::{GroupKey, ScalingGroup, StrongPoint};
use scaling_rs::models::{amdahl_speedup, serial_fraction_fit};
use scaling_rs::{StrongScalingConfig, analyze_strong};
use std::hint::black_box;

/// Synthetic strong-scaling group with `n` thread counts on an Amdahl curve
fn generate_group(n: usize) -> ScalingGroup<StrongPoint> {
    let points = (1..=n as u32)
        .map(|threads| {
            let speedup = amdahl_speedup(0.1, threads as f64);
            StrongPoint {
                threads,
                time_per_rep: 10.0 / speedup,
                speedup,
                efficiency: speedup / threads as f64,
            }
        })
        .collect();
    ScalingGroup {
        key: GroupKey::new("3840x2160", 7),
        points,
    }
}

fn benchmark_serial_fraction_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial_fraction_fit");

    for n in [8, 64, 512] {
        let samples = generate_group(n).speedup_samples();
        group.bench_with_input(BenchmarkId::from_parameter(n), &samples, |b, samples| {
            b.iter(|| serial_fraction_fit(black_box(samples)))
        });
    }

    group.finish();
}

fn benchmark_analyze_strong(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_strong");
    let config = StrongScalingConfig::default();

    for n in [8, 64, 512] {
        let data = generate_group(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| analyze_strong(black_box(data), &config))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_serial_fraction_fit, benchmark_analyze_strong);
criterion_main!(benches);
