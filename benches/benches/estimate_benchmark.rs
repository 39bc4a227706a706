//! Estimator overhead benchmarks.
//!
//! Run with: `cargo bench --package etaloop-bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use etaloop_bench::{bench_clock, drain, printing_estimator, silent_estimator};
use etaloop_lib::{Overwrite, Report};
use std::time::Duration;

const STEP: Duration = Duration::from_micros(250);

fn estimator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");

    for len in [1_000usize, 100_000] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("silent", len), &len, |b, &len| {
            b.iter(|| {
                let clock = bench_clock();
                drain(silent_estimator(len, clock.clone()), &clock, STEP)
            });
        });

        group.bench_with_input(BenchmarkId::new("append", len), &len, |b, &len| {
            b.iter(|| {
                let clock = bench_clock();
                drain(
                    printing_estimator(len, clock.clone(), Overwrite::Never),
                    &clock,
                    STEP,
                )
            });
        });
    }

    group.finish();
}

fn report_benchmark(c: &mut Criterion) {
    let clock = bench_clock();
    let mut estimator = silent_estimator(1_000, clock.clone());
    clock.advance(Duration::from_secs(7));
    let report: Report = estimator.nth(420).map(|(_, r)| r).unwrap();

    let mut group = c.benchmark_group("report");
    group.bench_function("compute", |b| {
        b.iter(|| {
            Report::compute(
                black_box(report.start_time),
                black_box(report.now),
                black_box(421),
                black_box(Some(1_000)),
            )
        });
    });
    group.bench_function("display", |b| b.iter(|| black_box(&report).to_string()));
    group.bench_function("json", |b| b.iter(|| black_box(&report).to_json(None)));
    group.bench_function("json_indent", |b| {
        b.iter(|| black_box(&report).to_json(Some(2)))
    });
    group.finish();
}

criterion_group!(benches, estimator_benchmark, report_benchmark);
criterion_main!(benches);
