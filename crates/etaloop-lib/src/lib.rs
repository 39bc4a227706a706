//! Time estimates and ETA for long-running iteration loops.
//!
//! This is a facade crate that re-exports functionality from the etaloop
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use etaloop_lib::prelude::*;
//!
//! let data: Vec<u32> = (0..42).collect();
//! let quiet = EstimatorBuilder::new().auto_print(false);
//!
//! for (num, report) in data.iter().eta_with(quiet) {
//!     // Do something useful with `num` here.
//!     let _ = num;
//!     if report.is_complete() {
//!         println!("{}", report.to_json(Some(2)).unwrap());
//!     }
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/etaloop/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export report types
pub use etaloop_types::*;

// Re-export the estimator
pub use etaloop_estimate::{
    Clock, Estimator, EstimatorBuilder, EstimatorConfig, EtaIteratorExt, ManualClock, Overwrite,
    Sink, SystemClock,
};

/// Prelude module for convenient imports.
///
/// ```
/// use etaloop_lib::prelude::*;
/// ```
pub mod prelude {
    pub use etaloop_types::{Report, ReportError, Result, Segment};

    pub use etaloop_estimate::{
        Estimator, EstimatorBuilder, EstimatorConfig, EtaIteratorExt, Overwrite, Sink,
    };
}
