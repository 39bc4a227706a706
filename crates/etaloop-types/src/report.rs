//! Progress report and the linear estimate behind it.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::text::serde_text;
use crate::{Result, Segment, format_duration};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// ANSI "erase entire line", sent after a carriage return when a report
/// replaces the previous one in place.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Immutable snapshot of an iteration's progress.
///
/// A report is a pure function of the start time, the time it was taken,
/// the number of items done and the total (if known). `remaining`, `total`
/// and `eta` are only present when the total is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When the iteration started.
    #[serde(with = "serde_text::timestamp")]
    pub start_time: DateTime<Utc>,
    /// When this report was taken.
    #[serde(with = "serde_text::timestamp")]
    pub now: DateTime<Utc>,
    /// The whole run: elapsed plus estimated remaining time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Segment>,
    /// What is still left to do.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Segment>,
    /// What has been done so far.
    pub done: Segment,
    /// Projected completion time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_text::opt_timestamp"
    )]
    pub eta: Option<DateTime<Utc>>,
}

impl Report {
    /// Computes a report by linear extrapolation.
    ///
    /// The average time per item so far is multiplied by the number of items
    /// left. Before the first item is done there is no rate, so the remaining
    /// and total times and the ETA are `None`; the only exception is a run
    /// with nothing left to do, whose remaining time is zero.
    ///
    /// If `done_count` exceeds `total_count` the remaining count saturates
    /// at zero and the done percentage is capped at 100.
    #[must_use]
    pub fn compute(
        start_time: DateTime<Utc>,
        now: DateTime<Utc>,
        done_count: usize,
        total_count: Option<usize>,
    ) -> Self {
        let elapsed = (now - start_time).to_std().unwrap_or(Duration::ZERO);

        let Some(total_count) = total_count else {
            return Self {
                start_time,
                now,
                total: None,
                remaining: None,
                done: Segment::new(Some(elapsed), done_count, None),
                eta: None,
            };
        };

        let remaining_count = total_count.saturating_sub(done_count);
        let done_percentage = percentage(done_count, total_count);

        let remaining_time = if remaining_count == 0 {
            Some(Duration::ZERO)
        } else if done_count == 0 {
            None
        } else {
            Some(extrapolate(elapsed, done_count, remaining_count))
        };

        Self {
            start_time,
            now,
            total: Some(Segment::new(
                remaining_time.map(|t| elapsed.saturating_add(t)),
                total_count,
                Some(100.0),
            )),
            remaining: Some(Segment::new(
                remaining_time,
                remaining_count,
                Some(100.0 - done_percentage),
            )),
            done: Segment::new(Some(elapsed), done_count, Some(done_percentage)),
            eta: remaining_time.map(|t| advance(now, t)),
        }
    }

    /// Returns the time elapsed between the start and this report.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.done.time.unwrap_or_default()
    }

    /// Returns the number of items done.
    #[must_use]
    pub const fn done_count(&self) -> usize {
        self.done.absolute
    }

    /// Returns the total number of items, if known.
    #[must_use]
    pub fn total_count(&self) -> Option<usize> {
        self.total.map(|t| t.absolute)
    }

    /// Returns the estimated remaining time, if it can be computed.
    #[must_use]
    pub fn remaining_time(&self) -> Option<Duration> {
        self.remaining.and_then(|r| r.time)
    }

    /// Returns the average time per item so far, or `None` before the first
    /// item is done.
    #[must_use]
    pub fn rate(&self) -> Option<Duration> {
        let done = self.done.absolute;
        (done > 0).then(|| duration_from_nanos(self.elapsed().as_nanos() / done as u128))
    }

    /// Returns true if the total is known and nothing remains.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining.is_some_and(|r| r.absolute == 0)
    }

    /// Renders the report as JSON.
    ///
    /// With `indent` set, the output is pretty-printed using that many spaces
    /// per level; otherwise it is a single compact line. Fields that cannot be
    /// computed are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, indent: Option<usize>) -> Result<String> {
        let Some(width) = indent else {
            return Ok(serde_json::to_string(self)?);
        };

        let indent = vec![b' '; width];
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Renders the report as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parses a report from its JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid report.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the human-readable line followed by a newline, then flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_line<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{self}")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns to the start of the line, clears it and writes the
    /// human-readable line without a newline, then flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_refresh<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "\r{CLEAR_LINE}{self}")?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(total) = self.total else {
            return write!(
                f,
                "{} done, elapsed {}",
                self.done.absolute,
                format_duration(self.elapsed())
            );
        };

        let remaining = self
            .remaining_time()
            .map_or_else(|| "unknown".to_string(), format_duration);
        let eta = self.eta.map_or_else(
            || "unknown".to_string(),
            |eta| {
                eta.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        );

        write!(
            f,
            "{}/{} = {:.1}%, ETA Delta {}, ETA {}",
            self.done.absolute,
            total.absolute,
            self.done.percentage.unwrap_or_default(),
            remaining,
            eta
        )
    }
}

/// Share of `part` in `whole`, in percent. An empty whole counts as fully
/// done.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 100.0;
    }
    (part as f64 / whole as f64 * 100.0).min(100.0)
}

/// `elapsed / done * remaining`, in integer nanoseconds.
fn extrapolate(elapsed: Duration, done: usize, remaining: usize) -> Duration {
    elapsed
        .as_nanos()
        .checked_mul(remaining as u128)
        .map_or(Duration::MAX, |n| duration_from_nanos(n / done as u128))
}

fn duration_from_nanos(nanos: u128) -> Duration {
    u64::try_from(nanos / NANOS_PER_SEC).map_or(Duration::MAX, |secs| {
        Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
    })
}

/// `now + delta`, saturating at the latest representable timestamp.
fn advance(now: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(delta)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
