//! Time, count and share of one part of a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::text::serde_text;

/// One slice of a run: the done part, the remaining part, or the whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Time this slice takes, if it can be known yet.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_text::opt_duration"
    )]
    pub time: Option<Duration>,
    /// Number of items in this slice.
    pub absolute: usize,
    /// Share of the total in percent, only when the total is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub const fn new(time: Option<Duration>, absolute: usize, percentage: Option<f64>) -> Self {
        Self {
            time,
            absolute,
            percentage,
        }
    }
}
