//! etaloop CLI - Progress and ETA for long-running loops and line streams.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::OutputArgs;

#[derive(Parser)]
#[command(name = "etaloop")]
#[command(about = "Progress and ETA for long-running loops and line streams", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count through a list of numbers, pausing on each one
    Demo {
        /// Number of items to process
        #[arg(short, long, default_value = "42")]
        count: usize,

        /// Pause per item in milliseconds
        #[arg(short, long, default_value = "100")]
        delay_ms: u64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Pass lines through to stdout and report progress on stderr
    Lines {
        /// Input file (reads stdin if omitted). A file is read up front so
        /// its line count is known.
        file: Option<PathBuf>,

        /// Expected number of lines, for streams of unknown length
        #[arg(short, long)]
        total: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Demo {
            count,
            delay_ms,
            output,
        } => commands::demo::demo(count, delay_ms, &output, cli.quiet),
        Commands::Lines {
            file,
            total,
            output,
        } => commands::lines::lines(file.as_deref(), total, &output, cli.quiet),
    }
}
