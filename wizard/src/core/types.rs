//! Shared deterministic types for the navigation core.
//!
//! These types are the stable contract between the controller, its view and
//! the scripted driver. They carry no behaviour beyond formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a step in the wizard's flattened step list.
///
/// When the wizard has a mode selector, `StepId(0)` is the root step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepId(pub usize);

impl StepId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a wizard invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStatus {
    Open,
    Finished,
    Cancelled,
}

impl fmt::Display for WizardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WizardStatus::Open => "open",
            WizardStatus::Finished => "finished",
            WizardStatus::Cancelled => "cancelled",
        })
    }
}

/// Why a navigation request left the current step unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayReason {
    /// `advance` on the last step (successor is a fixed point).
    LastStep,
    /// `retreat` with nowhere to go.
    FirstStep,
    /// The current step rejected its input.
    ValidationFailed,
    /// The non-final commit of the current step failed.
    CommitFailed,
}

/// Result of `advance` / `retreat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Moved { from: StepId, to: StepId },
    Stayed { at: StepId, reason: StayReason },
}

impl Transition {
    /// Step the wizard is positioned at after the transition.
    pub fn current(&self) -> StepId {
        match *self {
            Transition::Moved { to, .. } => to,
            Transition::Stayed { at, .. } => at,
        }
    }

    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Why `finish` stopped before closing the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    ValidationFailed,
    CommitFailed,
}

/// Result of `finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishOutcome {
    /// Every remaining step committed; the wizard is closed.
    Finished { last: StepId },
    /// The wizard stays open, positioned at the failing step.
    Aborted { at: StepId, reason: AbortReason },
}

/// Snapshot of what the view needs to render buttons and the title bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current: StepId,
    pub title: String,
    pub help_id: Option<String>,
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub is_last: bool,
    pub status: WizardStatus,
}
