//! Errors that indicate a wiring or usage bug rather than a user mistake.
//!
//! Validation and commit failures are never reported through this type; the
//! controller resolves them into a stay/abort outcome.

use thiserror::Error;

use crate::core::types::{StepId, WizardStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {0} is not registered with this wizard")]
    UnknownStep(StepId),
    #[error("mode '{0}' is not offered by this wizard")]
    UnknownMode(String),
    #[error("mode index {0} is out of range")]
    ModeOutOfRange(usize),
    #[error("a mode-driven wizard needs at least one mode")]
    NoModes,
    #[error("a wizard needs at least one step")]
    NoSteps,
    #[error("this wizard has no mode selector")]
    NoModeSelector,
    #[error("the wizard is already closed ({0:?})")]
    Closed(WizardStatus),
}
