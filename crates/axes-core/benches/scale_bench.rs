// File: crates/axes-core/benches/scale_bench.rs
// Summary: Criterion benches for numeric and calendar scale selection.

use axes_core::{choose_scale, choose_time_scale};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_numeric(c: &mut Criterion) {
    let ranges: Vec<(f64, f64)> = (1..1_000).map(|i| (-(i as f64) * 0.37, i as f64 * 13.1)).collect();
    c.bench_function("choose_scale_1k", |b| {
        b.iter(|| {
            for &(lo, hi) in &ranges {
                black_box(choose_scale(black_box(lo), black_box(hi), 5));
            }
        })
    });
}

fn bench_time(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let ends: Vec<_> = (1..1_000).map(|i| start + Duration::minutes(i * i * 7)).collect();
    c.bench_function("choose_time_scale_1k", |b| {
        b.iter(|| {
            for &end in &ends {
                black_box(choose_time_scale(start, black_box(end), 5));
            }
        })
    });
}

criterion_group!(benches, bench_numeric, bench_time);
criterion_main!(benches);
