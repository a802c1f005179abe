//! Builder for Gherkin feature text.

/// Builds feature text line by line.
///
/// Scenarios are separated by a blank line, steps are indented under their
/// scenario so line numbers stay predictable: the first scenario header of a
/// feature without tags is on line 2.
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    lines: Vec<String>,
}

impl FeatureBuilder {
    /// Start a feature called `name`
    pub fn new(name: &str) -> Self {
        Self {
            lines: vec![format!("Feature: {}", name)],
        }
    }

    /// Start a feature carrying `tags`
    pub fn tagged(tags: &[&str], name: &str) -> Self {
        Self {
            lines: vec![tags.join(" "), format!("Feature: {}", name)],
        }
    }

    /// Add a scenario with its steps
    pub fn scenario(self, name: &str, steps: &[&str]) -> Self {
        self.tagged_scenario(&[], name, steps)
    }

    /// Add a scenario with tags and steps
    pub fn tagged_scenario(mut self, tags: &[&str], name: &str, steps: &[&str]) -> Self {
        if self.lines.iter().any(|l| l.trim_start().starts_with("Scenario:")) {
            self.lines.push(String::new());
        }
        if !tags.is_empty() {
            self.lines.push(format!("  {}", tags.join(" ")));
        }
        self.lines.push(format!("  Scenario: {}", name));
        self.lines.extend(steps.iter().map(|step| format!("    {}", step)));
        self
    }

    /// 1-based line of the header of scenario `name`
    pub fn scenario_line(&self, name: &str) -> Option<usize> {
        let header = format!("Scenario: {}", name);
        self.lines
            .iter()
            .position(|line| line.trim() == header)
            .map(|index| index + 1)
    }

    /// Feature text, newline terminated
    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
