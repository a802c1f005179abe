//! `bddbridge` binary.
//!
//! Compiles runner arguments into a tag expression, or rebuilds the JSON
//! status report from recorded step results.

mod cli;

use anyhow::Context;
use bddbridge::monitoring::{init_logging, LogExt, LoggingConfig};
use bddbridge::reporter::{ReportAggregator, ReporterConfig};
use bddbridge::{compile_tag_expression, replay_results};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env())?;

    match cli.command {
        Command::Tags { args } => {
            println!("{}", compile_tag_expression(&args));
            Ok(())
        }
        Command::Report {
            input,
            config,
            output,
            base_path,
        } => report(input, config, output, base_path),
    }
}

fn report(
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<String>,
    base_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut reporter_config = match config {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read reporter config {}", path.display()))?;
            ReporterConfig::from_json_str(&text).log_err("Invalid reporter config")?
        }
        None => ReporterConfig::load(),
    };
    if let Some(base_path) = base_path {
        reporter_config.base_path = base_path;
    }
    if output.is_some() {
        reporter_config.bdd_json.output_file = output;
    }

    let file = File::open(&input).with_context(|| format!("Failed to open {}", input.display()))?;
    let mut aggregator = ReportAggregator::new(reporter_config);
    let stats = replay_results(BufReader::new(file), &mut aggregator)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    info!(
        recorded = stats.recorded,
        unparsable = stats.unparsable,
        rejected = stats.rejected,
        "Replayed step results"
    );

    if aggregator.config().output_path().is_some() {
        match aggregator.on_run_complete() {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Report could not be written"),
        }
    } else {
        println!("{}", aggregator.report().to_pretty_json()?);
        aggregator.on_run_complete();
    }

    Ok(())
}
