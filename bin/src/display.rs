//! Report rendering for the etaloop CLI.

use anyhow::Result;
use clap::{Args, ValueEnum};
use etaloop_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Stderr, Write};

/// How per-step reports are rendered.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    /// One human-readable line per report.
    Text,
    /// One JSON document per report.
    Json,
}

/// Output options shared by all commands.
#[derive(Args)]
pub(crate) struct OutputArgs {
    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub(crate) format: Format,

    /// Indent JSON reports by this many spaces (one line per report if omitted)
    #[arg(long)]
    pub(crate) indent: Option<usize>,

    /// Print every text report on its own line instead of overwriting
    #[arg(long)]
    pub(crate) append: bool,

    /// Draw a progress bar instead of reports (ignores --format)
    #[arg(long)]
    pub(crate) bar: bool,
}

/// Where reports go once the estimator has produced them.
///
/// Text reports are written by the estimator itself through auto-print;
/// the other variants render each report here.
pub(crate) enum ReportDisplay {
    /// Nothing is shown.
    Hidden,
    /// The estimator auto-prints text reports to stderr.
    Text,
    /// JSON reports on stderr.
    Json { indent: Option<usize> },
    /// An indicatif progress bar on stderr.
    Bar(ProgressBar),
}

impl ReportDisplay {
    /// Picks the display for the given options.
    pub(crate) fn new(args: &OutputArgs, quiet: bool) -> Self {
        if quiet {
            Self::Hidden
        } else if args.bar {
            Self::Bar(ProgressBar::no_length())
        } else {
            match args.format {
                Format::Text => Self::Text,
                Format::Json => Self::Json {
                    indent: args.indent,
                },
            }
        }
    }

    /// Returns an estimator builder that prints to stderr when this display
    /// relies on auto-print, and stays silent otherwise.
    pub(crate) fn builder(&self, args: &OutputArgs) -> EstimatorBuilder<Stderr> {
        let overwrite = if args.append {
            Overwrite::Never
        } else {
            Overwrite::Auto
        };
        EstimatorBuilder::new()
            .sink(io::stderr())
            .overwrite(overwrite)
            .auto_print(matches!(self, Self::Text))
    }

    /// Prepares the display once the total is known.
    pub(crate) fn start(&self, total: Option<usize>) {
        if let Self::Bar(pb) = self {
            match total {
                Some(total) => {
                    pb.set_length(total as u64);
                    pb.set_style(
                        ProgressStyle::default_bar()
                            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
                            .expect("Invalid progress template")
                            .progress_chars("=>-"),
                    );
                }
                None => pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .expect("Invalid progress template"),
                ),
            }
        }
    }

    /// Shows one report on stderr.
    pub(crate) fn show(&self, report: &Report) -> Result<()> {
        self.render(report, &mut io::stderr().lock())
    }

    fn render<W: Write>(&self, report: &Report, out: &mut W) -> Result<()> {
        match self {
            Self::Hidden | Self::Text => {}
            Self::Json { indent } => {
                writeln!(out, "{}", report.to_json(*indent)?)?;
            }
            Self::Bar(pb) => {
                pb.set_position(report.done_count() as u64);
                pb.set_message(report.to_string());
            }
        }
        Ok(())
    }

    /// Finishes the display after the last item.
    pub(crate) fn finish(&self, last: Option<&Report>) {
        if let Self::Bar(pb) = self {
            match last {
                Some(report) => pb.finish_with_message(report.to_string()),
                None => pb.finish_and_clear(),
            }
        }
    }
}
