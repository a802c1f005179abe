//! Command line interface for the `bddbridge` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments for the `bddbridge` binary.
#[derive(Debug, Parser)]
#[command(name = "bddbridge", version, about = "Gherkin tag filters and status reports for browser test runs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tag expression a runner argument list compiles to
    Tags {
        /// Runner arguments, e.g. `--tags @smoke,@fast --tags ~@wip`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Build a status report from step results recorded one JSON object per line
    Report {
        /// Recorded results
        #[arg(short, long)]
        input: PathBuf,

        /// Host reporter configuration (`basePath`, `bddJSONReporter.outputFile`)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report file; printed to stdout when neither this nor the config names one
        #[arg(short, long)]
        output: Option<String>,

        /// Directory a relative output path is resolved against
        #[arg(long)]
        base_path: Option<PathBuf>,
    },
}
