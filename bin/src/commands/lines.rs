//! Lines command implementation.
//!
//! Copies lines from a file or stdin to stdout unchanged while reporting
//! progress on stderr.

use crate::display::{OutputArgs, ReportDisplay};
use anyhow::{Context, Result};
use etaloop_lib::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Pass lines through from `file` (or stdin) to stdout.
pub(crate) fn lines(
    file: Option<&Path>,
    total: Option<usize>,
    output: &OutputArgs,
    quiet: bool,
) -> Result<()> {
    let display = ReportDisplay::new(output, quiet);
    let mut builder = display.builder(output);
    if let Some(total) = total {
        builder = builder.total(total);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let count = match file {
        Some(path) => {
            let lines = read_lines(path)?;
            pass_through(
                lines.into_iter().map(Ok::<_, io::Error>),
                builder,
                &display,
                &mut out,
            )?
        }
        None => pass_through(io::stdin().lock().lines(), builder, &display, &mut out)?,
    };
    out.flush()?;

    info!(lines = count, "input exhausted");
    Ok(())
}

/// Read a whole file as lines so its length is known before iterating.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<io::Result<_>>()
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Copy `lines` to `out`, showing a report per line. Returns the number of
/// lines copied.
fn pass_through<I, S, W>(
    lines: I,
    builder: EstimatorBuilder<S>,
    display: &ReportDisplay,
    out: &mut W,
) -> Result<usize>
where
    I: IntoIterator<Item = io::Result<String>>,
    S: Sink,
    W: Write,
{
    let estimator = builder.build(lines);
    display.start(estimator.total_count());

    let mut last = None;
    for (line, report) in estimator {
        let line = line.context("Failed to read input")?;
        writeln!(out, "{line}")?;
        display.show(&report)?;
        last = Some(report);
    }
    display.finish(last.as_ref());

    Ok(last.map_or(0, |report| report.done_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet() -> EstimatorBuilder<Vec<u8>> {
        EstimatorBuilder::new().auto_print(false).sink(Vec::new())
    }

    #[test]
    fn test_pass_through_copies_lines() {
        let input = Cursor::new("alpha\nbeta\ngamma\n");
        let mut out = Vec::new();

        let count = pass_through(input.lines(), quiet(), &ReportDisplay::Hidden, &mut out).unwrap();

        assert_eq!(count, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn test_pass_through_empty_input() {
        let mut out = Vec::new();
        let count =
            pass_through(Cursor::new("").lines(), quiet(), &ReportDisplay::Hidden, &mut out)
                .unwrap();

        assert_eq!(count, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_lines_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one").unwrap();
        writeln!(file, "two").unwrap();

        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_lines(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open"));
    }
}
