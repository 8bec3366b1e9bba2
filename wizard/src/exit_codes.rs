//! Stable exit codes for wizard CLI commands.

use crate::core::types::WizardStatus;

/// Command succeeded; for `run`, the wizard finished.
pub const OK: i32 = 0;
/// Invalid config or script, or any other error.
pub const INVALID: i32 = 1;
/// `wizard run` ended with the wizard still open.
pub const OPEN: i32 = 2;
/// `wizard run` ended with the wizard cancelled.
pub const CANCELLED: i32 = 3;

pub fn for_status(status: WizardStatus) -> i32 {
    match status {
        WizardStatus::Finished => OK,
        WizardStatus::Open => OPEN,
        WizardStatus::Cancelled => CANCELLED,
    }
}
