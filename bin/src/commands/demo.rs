//! Demo command implementation.
//!
//! Counts through a list of numbers, printing each one and pausing, while the
//! estimator reports progress on stderr.

use crate::display::{OutputArgs, ReportDisplay};
use anyhow::Result;
use std::thread;
use std::time::Duration;

/// Run the demo loop over `count` numbers.
pub(crate) fn demo(count: usize, delay_ms: u64, output: &OutputArgs, quiet: bool) -> Result<()> {
    let data: Vec<usize> = (0..count).collect();
    let delay = Duration::from_millis(delay_ms);

    let display = ReportDisplay::new(output, quiet);
    let estimator = display.builder(output).build(&data);
    display.start(estimator.total_count());

    let mut last = None;
    for (num, report) in estimator {
        // Do something useful here that takes a little time
        println!("{num}");
        thread::sleep(delay);
        display.show(&report)?;
        last = Some(report);
    }
    display.finish(last.as_ref());

    Ok(())
}
