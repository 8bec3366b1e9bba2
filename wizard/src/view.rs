//! The dialog-facing surface the controller drives.
//!
//! Rendering, focus and button wiring live behind this trait. The controller
//! only tells the view what to show.

use serde::Serialize;

use crate::core::types::{NavigationState, WizardStatus};

pub trait WizardView {
    /// Show a user-facing error near the current step.
    fn show_error(&mut self, title: Option<&str>, message: &str);

    /// Button enablement, title or current step changed.
    fn refresh(&mut self, _state: &NavigationState) {}

    /// The wizard closed (finished or cancelled).
    fn close(&mut self, _status: WizardStatus) {}
}

/// An error the controller asked the view to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShownError {
    pub title: Option<String>,
    pub message: String,
}

/// View that keeps everything it was asked to show, for transcripts and tests.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub errors: Vec<ShownError>,
    pub refreshes: usize,
    pub last_state: Option<NavigationState>,
    pub closed: Option<WizardStatus>,
}

impl WizardView for RecordingView {
    fn show_error(&mut self, title: Option<&str>, message: &str) {
        self.errors.push(ShownError {
            title: title.map(str::to_string),
            message: message.to_string(),
        });
    }

    fn refresh(&mut self, state: &NavigationState) {
        self.refreshes += 1;
        self.last_state = Some(state.clone());
    }

    fn close(&mut self, status: WizardStatus) {
        self.closed = Some(status);
    }
}
