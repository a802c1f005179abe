//! Step definitions for the bridge's BDD suite

pub mod report_steps;
pub mod run_steps;
pub mod tag_steps;
