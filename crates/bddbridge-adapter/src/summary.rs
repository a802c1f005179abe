//! Collects the summary formatter's output for printing at run end

use bddbridge_core::FeatureSource;

/// Tracing target the run summary is logged under
pub const SUMMARY_TARGET: &str = "bddbridge::summary";

/// Coloured banner naming a feature and where it came from
pub fn feature_banner(feature: &FeatureSource) -> String {
    format!(
        "\n\x1b[93mFeature: {} \x1b[33m({})\x1b[0m",
        feature.feature_description(),
        feature.uri
    )
}

/// Formatter output accumulated over a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SummaryLog {
    lines: Vec<String>,
}

impl SummaryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one chunk of formatter output for `feature`.
    ///
    /// Blank chunks are dropped. Chunks mentioning a scenario are preceded by
    /// the feature banner so interleaved features stay readable.
    pub fn record(&mut self, feature: &FeatureSource, output: &str) {
        let output = output.trim();
        if output.is_empty() {
            return;
        }

        if output.to_lowercase().contains("scenario") {
            self.lines.push(feature_banner(feature));
        }
        self.lines.push(output.to_string());
    }

    /// Recorded lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join and clear the log
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.lines).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> FeatureSource {
        FeatureSource::new("/base/login.feature", "Feature: Login\n")
    }

    #[test]
    fn test_banner() {
        assert_eq!(
            feature_banner(&feature()),
            "\n\x1b[93mFeature: Login \x1b[33m(/base/login.feature)\x1b[0m"
        );
    }

    #[test]
    fn test_record_skips_blank_output() {
        let mut log = SummaryLog::new();
        log.record(&feature(), "   \n");
        assert!(log.is_empty());
    }

    #[test]
    fn test_scenario_output_gets_banner() {
        let mut log = SummaryLog::new();
        log.record(&feature(), "1 scenario (1 passed)\n");
        log.record(&feature(), "3 steps (3 passed)");

        assert_eq!(
            log.lines(),
            &[
                feature_banner(&feature()),
                "1 scenario (1 passed)".to_string(),
                "3 steps (3 passed)".to_string(),
            ]
        );
    }

    #[test]
    fn test_flush_clears() {
        let mut log = SummaryLog::new();
        log.record(&feature(), "a");
        log.record(&feature(), "b");

        assert_eq!(log.flush(), "a\nb");
        assert!(log.is_empty());
        assert_eq!(log.flush(), "");
    }
}
