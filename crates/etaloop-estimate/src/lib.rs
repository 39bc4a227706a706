//! Iterator adapter that estimates remaining time and ETA.
//!
//! This crate wraps any iterator and reports progress as it is consumed:
//!
//! - [`Estimator`] - Yields `(item, Report)` pairs and optionally prints each report
//! - [`EstimatorBuilder`] / [`EstimatorConfig`] - Total override, auto-print and layout settings
//! - [`Overwrite`] - Whether reports replace the previous line
//! - [`Sink`] - Destination for auto-printed reports
//! - [`Clock`], [`SystemClock`], [`ManualClock`] - Time sources
//! - [`EtaIteratorExt`] - `.eta()` on any iterable

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/etaloop/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod estimator;
mod ext;
mod sink;

pub use clock::{Clock, ManualClock, SystemClock};
pub use estimator::{Estimator, EstimatorBuilder, EstimatorConfig, Overwrite};
pub use etaloop_types::Report;
pub use ext::EtaIteratorExt;
pub use sink::Sink;
