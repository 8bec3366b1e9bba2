//! Test-only helpers for building scripted wizards.

use std::path::{Path, PathBuf};

use crate::context::WizardContext;
use crate::controller::{Wizard, WizardBuilder};
use crate::core::types::StepId;
use crate::mode::Mode;
use crate::script::StepSpec;
use crate::scripted::{Journal, ScriptedMode, ScriptedStep};
use crate::step::Step;
use crate::view::RecordingView;

/// A visible step that accepts and commits.
pub fn spec(id: &str) -> StepSpec {
    StepSpec::new(id)
}

pub fn hidden(id: &str) -> StepSpec {
    StepSpec {
        visible: false,
        ..StepSpec::new(id)
    }
}

/// A step whose validation fails with "<id> is invalid".
pub fn rejecting(id: &str) -> StepSpec {
    StepSpec {
        valid: false,
        validation_error: Some(format!("{} is invalid", id)),
        ..StepSpec::new(id)
    }
}

/// A step whose final commit fails with `message`.
pub fn failing_commit(id: &str, message: &str) -> StepSpec {
    StepSpec {
        commit_error: Some(message.to_string()),
        ..StepSpec::new(id)
    }
}

/// New-project wizard with one scripted mode per entry, first mode active.
pub fn modes_wizard(journal: &Journal, modes: Vec<(&str, Vec<StepSpec>)>) -> Wizard<RecordingView> {
    let modes: Vec<Box<dyn Mode>> = modes
        .into_iter()
        .map(|(name, steps)| {
            Box::new(ScriptedMode::new(name, None, steps, journal.clone())) as Box<dyn Mode>
        })
        .collect();
    WizardBuilder::with_modes(WizardContext::new(None), modes)
        .build(RecordingView::default())
        .expect("build modes wizard")
}

pub fn flat_wizard(journal: &Journal, steps: Vec<StepSpec>) -> Wizard<RecordingView> {
    let steps: Vec<Box<dyn Step>> = steps
        .into_iter()
        .map(|spec| Box::new(ScriptedStep::new(spec, journal.clone())) as Box<dyn Step>)
        .collect();
    WizardBuilder::flat(WizardContext::new(None), steps)
        .build(RecordingView::default())
        .expect("build flat wizard")
}

pub fn step_id(wizard: &Wizard<RecordingView>, name: &str) -> StepId {
    wizard
        .find_step(name)
        .unwrap_or_else(|| panic!("no step named {}", name))
}

/// Write `contents` as `wizard.toml` inside `dir`.
pub fn write_script(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("wizard.toml");
    std::fs::write(&path, contents).expect("write script");
    path
}

/// Fresh temporary directory holding a script.
pub fn script_dir(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_script(dir.path(), contents);
    (dir, path)
}
