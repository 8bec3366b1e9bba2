//! Structural checks a script must pass before a wizard is built from it.

use std::collections::{HashMap, HashSet};

use crate::script::{Action, Script};

/// Id of the root step in mode-driven scripts.
pub const ROOT_STEP_NAME: &str = "mode";

/// Check invariants serde cannot express:
/// - Step ids are non-empty and unique
/// - Flat scripts declare no modes; mode scripts declare at least one
/// - Every mode step exists, belongs to exactly one mode, and every step
///   belongs to some mode
/// - Mode names are non-empty and unique, and every mode lists steps
/// - Actions only name existing steps and modes
pub fn validate_script(script: &Script) -> Vec<String> {
    let mut errors = Vec::new();

    if script.steps.is_empty() {
        errors.push("script declares no steps".to_string());
    }

    let mut step_ids = HashSet::new();
    for step in &script.steps {
        if step.id.trim().is_empty() {
            errors.push("step id must not be empty".to_string());
        } else if !step_ids.insert(step.id.as_str()) {
            errors.push(format!("duplicate step id '{}'", step.id));
        }
        if !script.flat && step.id == ROOT_STEP_NAME {
            errors.push(format!(
                "step id '{}' is reserved for the root step",
                ROOT_STEP_NAME
            ));
        }
        if step.validation_title.is_some() && step.validation_error.is_none() {
            errors.push(format!(
                "step '{}': validation_title requires validation_error",
                step.id
            ));
        }
    }

    if script.flat {
        if !script.modes.is_empty() {
            errors.push("flat scripts must not declare modes".to_string());
        }
    } else {
        validate_modes(script, &step_ids, &mut errors);
    }

    validate_actions(script, &step_ids, &mut errors);
    errors
}

fn validate_modes(script: &Script, step_ids: &HashSet<&str>, errors: &mut Vec<String>) {
    if script.modes.is_empty() {
        errors.push(
            "script declares no modes (set flat = true to walk steps in order)".to_string(),
        );
        return;
    }

    let mut names = HashSet::new();
    let mut owner: HashMap<&str, &str> = HashMap::new();
    for mode in &script.modes {
        if mode.name.trim().is_empty() {
            errors.push("mode name must not be empty".to_string());
        } else if !names.insert(mode.name.as_str()) {
            errors.push(format!("duplicate mode name '{}'", mode.name));
        }
        if mode.steps.is_empty() {
            errors.push(format!("mode '{}' lists no steps", mode.name));
        }
        for step in &mode.steps {
            if !step_ids.contains(step.as_str()) {
                errors.push(format!("mode '{}': unknown step '{}'", mode.name, step));
                continue;
            }
            if let Some(previous) = owner.insert(step.as_str(), mode.name.as_str()) {
                errors.push(format!(
                    "step '{}' is listed by mode '{}' and mode '{}'",
                    step, previous, mode.name
                ));
            }
        }
    }

    for step in &script.steps {
        if !owner.contains_key(step.id.as_str()) {
            errors.push(format!("step '{}' is not part of any mode", step.id));
        }
    }
}

fn validate_actions(script: &Script, step_ids: &HashSet<&str>, errors: &mut Vec<String>) {
    for (index, action) in script.actions.iter().enumerate() {
        match action {
            Action::Jump(target) => {
                let is_root = !script.flat && target == ROOT_STEP_NAME;
                if !is_root && !step_ids.contains(target.as_str()) {
                    errors.push(format!("action {}: unknown step '{}'", index, target));
                }
            }
            Action::Mode(name) => {
                if script.flat {
                    errors.push(format!("action {}: flat scripts have no modes", index));
                } else if !script.modes.iter().any(|mode| mode.name == *name) {
                    errors.push(format!("action {}: unknown mode '{}'", index, name));
                }
            }
            Action::Next
            | Action::Back
            | Action::Finish
            | Action::Cancel
            | Action::RequestNext => {}
        }
    }
}
