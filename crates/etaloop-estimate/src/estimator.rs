//! Progress-tracking iterator adapter.

use std::io::{Stdout, Write};
use std::iter::FusedIterator;

use chrono::{DateTime, Utc};
use etaloop_types::Report;
use tracing::{debug, warn};

use crate::{Clock, Sink, SystemClock};

/// When auto-printed reports replace the previous line instead of starting a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overwrite {
    /// Overwrite only if the sink supports it (e.g. stdout is a terminal).
    #[default]
    Auto,
    /// Always overwrite.
    Always,
    /// Never overwrite; one line per report.
    Never,
}

impl Overwrite {
    /// Resolves this setting against a concrete sink.
    #[must_use]
    pub fn resolve<S: Sink + ?Sized>(self, sink: &S) -> bool {
        match self {
            Self::Auto => sink.supports_overwrite(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Plain settings for an [`Estimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Total number of items, overriding whatever the iterator reports.
    pub total: Option<usize>,
    /// Write a report to the sink after every step.
    pub auto_print: bool,
    /// How auto-printed reports are laid out.
    pub overwrite: Overwrite,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            total: None,
            auto_print: true,
            overwrite: Overwrite::Auto,
        }
    }
}

/// Builder for an [`Estimator`].
#[derive(Debug)]
pub struct EstimatorBuilder<W = Stdout> {
    config: EstimatorConfig,
    sink: W,
    clock: Box<dyn Clock + Send>,
}

impl EstimatorBuilder<Stdout> {
    /// Creates a builder with default settings, printing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EstimatorConfig::default(),
            sink: std::io::stdout(),
            clock: Box::new(SystemClock::new()),
        }
    }
}

impl Default for EstimatorBuilder<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> EstimatorBuilder<W> {
    /// Replaces all plain settings at once.
    #[must_use]
    pub fn config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the total number of items.
    ///
    /// Use this when the iterator cannot report its length, such as a
    /// generator or a stream of lines.
    #[must_use]
    pub fn total(mut self, total: usize) -> Self {
        self.config.total = Some(total);
        self
    }

    /// Enables or disables writing a report after every step.
    #[must_use]
    pub fn auto_print(mut self, auto_print: bool) -> Self {
        self.config.auto_print = auto_print;
        self
    }

    /// Sets how auto-printed reports are laid out.
    #[must_use]
    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Sets the time source.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Sets the destination for auto-printed reports.
    #[must_use]
    pub fn sink<S: Sink>(self, sink: S) -> EstimatorBuilder<S> {
        EstimatorBuilder {
            config: self.config,
            sink,
            clock: self.clock,
        }
    }

    /// Returns the current settings.
    #[must_use]
    pub const fn settings(&self) -> &EstimatorConfig {
        &self.config
    }
}

impl<W: Sink> EstimatorBuilder<W> {
    /// Wraps `items` and starts the clock.
    pub fn build<T: IntoIterator>(self, items: T) -> Estimator<T::IntoIter, W> {
        let items = items.into_iter();
        let total_count = self.config.total.or_else(|| exact_len(&items));
        let overwrite = self.config.overwrite.resolve(&self.sink);
        let start_time = self.clock.now();

        debug!(
            total = ?total_count,
            auto_print = self.config.auto_print,
            overwrite,
            "estimator started"
        );

        Estimator {
            items,
            total_count,
            start_time,
            done_count: 0,
            auto_print: self.config.auto_print,
            overwrite,
            pending_newline: false,
            finished: false,
            sink: self.sink,
            clock: self.clock,
        }
    }
}

/// Returns the iterator's length if its size hint is exact.
fn exact_len<I: Iterator>(items: &I) -> Option<usize> {
    match items.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(upper),
        _ => None,
    }
}

/// Iterator adapter that yields each item together with a progress
/// [`Report`].
///
/// The estimator is lazy and single-pass: every call to `next` pulls one item
/// from the wrapped iterator, counts it, and computes a fresh report. It holds
/// no external resources. Dropping it mid-run still ends an overwritten
/// progress line, so breaking out of a loop early leaves the sink tidy.
///
/// ```
/// use etaloop_estimate::EstimatorBuilder;
///
/// let data = vec![1, 2, 3];
/// let estimator = EstimatorBuilder::new().auto_print(false).build(&data);
///
/// for (num, report) in estimator {
///     assert_eq!(report.total_count(), Some(3));
///     let _ = num;
/// }
/// ```
#[derive(Debug)]
pub struct Estimator<I, W: Sink = Stdout> {
    items: I,
    total_count: Option<usize>,
    start_time: DateTime<Utc>,
    done_count: usize,
    auto_print: bool,
    overwrite: bool,
    pending_newline: bool,
    finished: bool,
    sink: W,
    clock: Box<dyn Clock + Send>,
}

impl<I: Iterator> Estimator<I, Stdout> {
    /// Wraps `items` with default settings: reports are printed to stdout,
    /// overwriting the previous line when stdout is a terminal.
    pub fn new<T: IntoIterator<IntoIter = I>>(items: T) -> Self {
        EstimatorBuilder::new().build(items)
    }
}

impl<I, W: Sink> Estimator<I, W> {
    /// Returns the number of items yielded so far.
    #[must_use]
    pub const fn done_count(&self) -> usize {
        self.done_count
    }

    /// Returns the total number of items, if known.
    #[must_use]
    pub const fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Returns when the estimator was created.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Computes a report for the current state without advancing.
    #[must_use]
    pub fn report(&self) -> Report {
        Report::compute(
            self.start_time,
            self.clock.now(),
            self.done_count,
            self.total_count,
        )
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Returns the sink mutably.
    pub const fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    fn emit(&mut self, report: &Report) {
        let result = if self.overwrite {
            report.write_refresh(&mut self.sink)
        } else {
            report.write_line(&mut self.sink)
        };

        match result {
            Ok(()) => self.pending_newline = self.overwrite,
            Err(err) => {
                warn!(error = %err, "failed to write progress report, disabling auto-print");
                self.auto_print = false;
                self.pending_newline = false;
            }
        }
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.end_line();

        debug!(done = self.done_count, "estimator exhausted");
    }

    /// Moves the cursor past an overwritten progress line.
    fn end_line(&mut self) {
        if !self.pending_newline {
            return;
        }
        self.pending_newline = false;
        if let Err(err) = writeln!(self.sink).and_then(|()| self.sink.flush()) {
            debug!(error = %err, "failed to terminate progress line");
        }
    }
}

impl<I, W: Sink> Drop for Estimator<I, W> {
    fn drop(&mut self) {
        self.end_line();
    }
}

impl<I: Iterator, W: Sink> Iterator for Estimator<I, W> {
    type Item = (I::Item, Report);

    fn next(&mut self) -> Option<Self::Item> {
        let Some(item) = self.items.next() else {
            self.finish();
            return None;
        };

        self.done_count += 1;
        let report = self.report();
        if self.auto_print {
            self.emit(&report);
        }

        Some((item, report))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<I: ExactSizeIterator, W: Sink> ExactSizeIterator for Estimator<I, W> {}

impl<I: FusedIterator, W: Sink> FusedIterator for Estimator<I, W> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;
    use chrono::TimeZone;
    use std::time::Duration;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
    }

    fn quiet() -> EstimatorBuilder<Vec<u8>> {
        EstimatorBuilder::new().auto_print(false).sink(Vec::new())
    }

    #[test]
    fn test_exact_len() {
        assert_eq!(exact_len(&vec![1, 2, 3].into_iter()), Some(3));
        assert_eq!(exact_len(&(0..10)), Some(10));
        assert_eq!(exact_len(&(0..10).filter(|n| n % 2 == 0)), None);
        assert_eq!(exact_len(&std::iter::repeat(1)), None);
    }

    #[test]
    fn test_total_detected_from_len() {
        let estimator = quiet().build(vec!['a', 'b', 'c']);
        assert_eq!(estimator.total_count(), Some(3));
    }

    #[test]
    fn test_total_override_wins() {
        let estimator = quiet().total(5).build(0..3);
        assert_eq!(estimator.total_count(), Some(5));
    }

    #[test]
    fn test_counts_and_order() {
        let items: Vec<_> = quiet().build(vec!["x", "y", "z"]).collect();

        let values: Vec<_> = items.iter().map(|(item, _)| *item).collect();
        assert_eq!(values, vec!["x", "y", "z"]);

        let counts: Vec<_> = items.iter().map(|(_, r)| r.done_count()).collect();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn test_report_before_first_step() {
        let estimator = quiet().clock(clock()).build(0..4);
        let report = estimator.report();

        assert_eq!(report.done_count(), 0);
        assert!(report.remaining_time().is_none());
        assert!(report.eta.is_none());
    }

    #[test]
    fn test_uses_injected_clock() {
        let clock = clock();
        let mut estimator = quiet().clock(clock.clone()).build(0..4);

        clock.advance(Duration::from_secs(3));
        let (_, report) = estimator.next().unwrap();

        assert_eq!(report.elapsed(), Duration::from_secs(3));
        assert_eq!(report.remaining_time(), Some(Duration::from_secs(9)));
        assert_eq!(report.start_time, estimator.start_time());
    }

    #[test]
    fn test_size_hint_passthrough() {
        let estimator = quiet().build(0..7);
        assert_eq!(estimator.size_hint(), (7, Some(7)));
        assert_eq!(estimator.len(), 7);
    }

    #[test]
    fn test_append_output() {
        let mut out = Vec::new();
        EstimatorBuilder::new()
            .overwrite(Overwrite::Never)
            .sink(&mut out)
            .build(0..3)
            .for_each(drop);

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("1/3 = 33.3%"));
        assert!(lines[2].starts_with("3/3 = 100.0%, ETA Delta 0:00:00.000000"));
        assert!(!out.contains('\r'));
    }

    #[test]
    fn test_overwrite_output() {
        let mut out = Vec::new();
        let mut estimator = EstimatorBuilder::new()
            .overwrite(Overwrite::Always)
            .sink(&mut out)
            .build(0..2);
        estimator.by_ref().for_each(drop);
        // Exhausted twice, then dropped: the trailing newline is written once.
        assert!(estimator.next().is_none());
        drop(estimator);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches('\r').count(), 2);
        assert_eq!(out.matches('\n').count(), 1);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_drop_ends_overwritten_line() {
        let mut out = Vec::new();
        let mut estimator = EstimatorBuilder::new()
            .overwrite(Overwrite::Always)
            .sink(&mut out)
            .build(0..10);
        for (item, _) in estimator.by_ref() {
            if item == 2 {
                break;
            }
        }
        assert!(!estimator.sink().ends_with(b"\n"));
        drop(estimator);

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches('\r').count(), 3);
        assert_eq!(out.matches('\n').count(), 1);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_drop_in_append_mode_writes_nothing_extra() {
        let mut out = Vec::new();
        let mut estimator = EstimatorBuilder::new()
            .overwrite(Overwrite::Never)
            .sink(&mut out)
            .build(0..10);
        estimator.next();
        drop(estimator);

        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_auto_overwrite_resolves_against_sink() {
        assert!(!Overwrite::Auto.resolve(&Vec::<u8>::new()));
        assert!(Overwrite::Always.resolve(&Vec::<u8>::new()));
        assert!(!Overwrite::Never.resolve(&Vec::<u8>::new()));
    }

    #[test]
    fn test_no_output_when_auto_print_disabled() {
        let mut estimator = quiet().overwrite(Overwrite::Always).build(0..5);
        estimator.by_ref().for_each(drop);
        assert!(estimator.sink().is_empty());
    }

    #[test]
    fn test_config_replaces_settings() {
        let config = EstimatorConfig {
            total: Some(9),
            auto_print: false,
            overwrite: Overwrite::Never,
        };
        let builder = EstimatorBuilder::new().config(config);
        assert_eq!(builder.settings(), &config);
    }
}
