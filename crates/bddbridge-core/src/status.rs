//! Step and scenario status values.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::types::StepResult;

/// Aggregated status of a step, scenario or feature.
///
/// Variants are declared weakest first so the derived ordering is the merge
/// precedence: `Failed > Pending > Passed`. Pending also covers skipped steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusValue {
    /// Everything ran and succeeded
    Passed,
    /// Pending, undefined or skipped
    Pending,
    /// At least one failure
    Failed,
}

impl StatusValue {
    /// Status of a single reported step.
    ///
    /// A raised skip flag wins over success; failure is only reported when
    /// the step neither succeeded nor was skipped.
    pub fn from_flags(success: bool, skipped: bool) -> Self {
        match (success, skipped) {
            (true, false) => StatusValue::Passed,
            (_, true) => StatusValue::Pending,
            (false, false) => StatusValue::Failed,
        }
    }

    /// Status of a step result
    pub fn of(result: &StepResult) -> Self {
        Self::from_flags(result.success, result.skipped)
    }

    /// The stronger of two statuses
    pub fn merge(self, other: StatusValue) -> StatusValue {
        self.max(other)
    }

    /// Merge into a possibly unset status; unset is weaker than everything
    pub fn merge_into(current: Option<StatusValue>, new: StatusValue) -> StatusValue {
        match current {
            Some(current) => current.merge(new),
            None => new,
        }
    }

    /// Lowercase name as written to reports
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusValue::Passed => "passed",
            StatusValue::Pending => "pending",
            StatusValue::Failed => "failed",
        }
    }
}

impl Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
