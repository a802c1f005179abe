//! Rebuild a report from results recorded one JSON object per line

use bddbridge_core::StepResult;
use bddbridge_reporter::ReportAggregator;
use std::io::BufRead;
use tracing::warn;

/// What happened to the replayed lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Results folded into the report
    pub recorded: usize,
    /// Lines that were not a step result
    pub unparsable: usize,
    /// Results the aggregator rejected
    pub rejected: usize,
}

/// Feed every step result in `input` to `aggregator`.
///
/// Blank lines are ignored; anything else that fails to parse is logged and
/// skipped. Only reading `input` itself can fail.
pub fn replay_results<R: BufRead>(input: R, aggregator: &mut ReportAggregator) -> std::io::Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<StepResult>(&line) {
            Ok(result) => {
                if aggregator.on_spec_complete(&result) {
                    stats.recorded += 1;
                } else {
                    stats.rejected += 1;
                }
            }
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping line that is not a step result");
                stats.unparsable += 1;
            }
        }
    }

    Ok(stats)
}
