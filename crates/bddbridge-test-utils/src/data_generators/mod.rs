//! Test data generators for the BDD bridge.
//!
//! Builders for Gherkin feature text and for the step results the host
//! runner hands to the reporter.

mod feature;
mod step_result;

pub use feature::*;
pub use step_result::*;

/// Creates the single-scenario login feature used by end-to-end tests.
///
/// # Returns
///
/// `Feature: Login` with one `valid user` scenario of one step.
pub fn create_login_feature() -> String {
    "Feature: Login\n  Scenario: valid user\n    Given a registered user\n".to_string()
}
