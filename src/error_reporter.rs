//! Error reporting utilities for user-friendly error display
//!
//! Builds on [`PhingrunError::display_for_user`] with hints specific to the
//! command that failed.

use phingrun_utils::error::{ErrorCategory, PhingrunError, UserFriendlyError};

/// Render an error report for the given operation (`run`, `config`).
#[must_use]
pub fn create_contextual_report(error: &PhingrunError, operation: &str) -> String {
    let mut report = error.display_for_user();

    let hint = match (operation, error.category()) {
        ("run", ErrorCategory::BuildEngine) => {
            Some("Run 'phingrun config' to see which Phing installation is used.")
        }
        ("run", ErrorCategory::BuildFile) => {
            Some("Run 'phingrun -v run --dry-run --file <path>' to check the command line first.")
        }
        (_, ErrorCategory::Configuration) => {
            Some("Settings come from .phingrun/config.toml, PHINGRUN_* variables and flags.")
        }
        _ => None,
    };

    if let Some(hint) = hint {
        report.push_str(&format!("\n{hint}\n"));
    }

    report
}
