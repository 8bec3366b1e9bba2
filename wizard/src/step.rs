//! The capability interface every wizard page implements.
//!
//! The controller never inspects concrete step types. It only calls the hooks
//! below, always with the wizard's shared [`WizardContext`].

use thiserror::Error;

use crate::context::WizardContext;

/// A step rejected its input. Shown to the user; the wizard stays put.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigurationError {
    pub message: String,
    pub title: Option<String>,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A step could not commit its data.
///
/// The message is optional: a step that already reported the problem itself
/// fails silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("commit failed"))]
pub struct CommitStepError {
    pub message: Option<String>,
}

impl CommitStepError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn silent() -> Self {
        Self { message: None }
    }
}

/// One page of the wizard.
pub trait Step {
    /// Short label for logs and transcripts.
    fn name(&self) -> &str;

    /// Whether navigation may stop on this step right now.
    fn is_visible(&self, _ctx: &WizardContext) -> bool {
        true
    }

    /// Check the page's input before leaving it forward.
    ///
    /// `Ok(false)` rejects silently (the step shows its own inline error);
    /// `Err` carries a message for the view.
    fn validate(&mut self, _ctx: &mut WizardContext) -> Result<bool, ConfigurationError> {
        Ok(true)
    }

    /// Flush page state into the context.
    fn update_data_model(&mut self, _ctx: &mut WizardContext) {}

    /// Called whenever the wizard navigates away from this step.
    fn on_step_leaving(&mut self, _ctx: &mut WizardContext) {}

    /// Refresh the page from the context before it is shown or committed.
    fn update_step(&mut self, _ctx: &mut WizardContext) {}

    /// Apply the step's data. `final_pass` is set while finishing.
    fn commit(
        &mut self,
        _ctx: &mut WizardContext,
        _final_pass: bool,
    ) -> Result<(), CommitStepError> {
        Ok(())
    }

    /// Release resources held by the page. Called once when the wizard closes.
    fn dispose_resources(&mut self) {}

    fn help_id(&self) -> Option<&str> {
        None
    }
}
