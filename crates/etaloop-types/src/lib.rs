//! Progress report types for etaloop.
//!
//! This crate provides the data structures and text formats shared by the
//! etaloop crates:
//!
//! - [`Report`] - Immutable progress snapshot with a linear time estimate
//! - [`Segment`] - Time, count and percentage of the done, remaining or total part
//! - [`format_duration`] / [`parse_duration`] - `H:MM:SS.ffffff` durations
//! - [`format_timestamp`] - RFC 3339 UTC timestamps with microseconds

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/etaloop/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod report;
mod segment;
mod text;

pub use error::{ReportError, Result};
pub use report::{CLEAR_LINE, Report};
pub use segment::Segment;
pub use text::{format_duration, format_timestamp, parse_duration};
