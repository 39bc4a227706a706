//! Benchmark utilities for etaloop.

use std::io;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use etaloop_lib::{Estimator, EstimatorBuilder, ManualClock, Overwrite};

/// Clock start shared by all benchmarks.
#[must_use]
pub fn bench_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

/// Builds a silent estimator over `0..len` driven by `clock`.
#[must_use]
pub fn silent_estimator(len: usize, clock: ManualClock) -> Estimator<std::ops::Range<usize>, io::Sink> {
    EstimatorBuilder::new()
        .auto_print(false)
        .sink(io::sink())
        .clock(clock)
        .build(0..len)
}

/// Builds an estimator over `0..len` that renders every report into a
/// discarding sink.
#[must_use]
pub fn printing_estimator(
    len: usize,
    clock: ManualClock,
    overwrite: Overwrite,
) -> Estimator<std::ops::Range<usize>, io::Sink> {
    EstimatorBuilder::new()
        .overwrite(overwrite)
        .sink(io::sink())
        .clock(clock)
        .build(0..len)
}

/// Drains `estimator`, advancing `clock` by `step` per item, and returns the
/// final done count.
pub fn drain(
    estimator: Estimator<std::ops::Range<usize>, io::Sink>,
    clock: &ManualClock,
    step: Duration,
) -> usize {
    let mut done = 0;
    for (_, report) in estimator {
        clock.advance(step);
        done = report.done_count();
    }
    done
}
