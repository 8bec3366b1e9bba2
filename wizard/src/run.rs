//! Replay a script's actions against a scripted wizard.
//!
//! Builds the wizard from [`ScriptedMode`]s (or a flat list of
//! [`ScriptedStep`]s), applies each action in order and collects a
//! [`Transcript`] of what happened.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::info;

use crate::context::WizardContext;
use crate::controller::{Wizard, WizardBuilder};
use crate::core::sdk::{most_recent_suitable_sdk, resolve_project_sdk};
use crate::core::types::{FinishOutcome, NavigationState, Transition, WizardStatus};
use crate::io::config::WizardConfig;
use crate::mode::{Mode, ModeChoiceStep};
use crate::script::{Action, Script, StepSpec};
use crate::scripted::{HookCall, Journal, ScriptedMode, ScriptedStep};
use crate::step::Step;
use crate::view::{RecordingView, ShownError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Transition(Transition),
    Finish(FinishOutcome),
    Cancelled,
    Jumped { found: bool },
    ModeSelected,
    EventsProcessed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub action: String,
    pub outcome: ActionOutcome,
    /// Name of the current step after the action.
    pub current: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub title: String,
    pub actions: Vec<ActionRecord>,
    pub status: WizardStatus,
    pub current: String,
    pub active_mode: Option<String>,
    pub navigation: NavigationState,
    pub hooks: Vec<HookCall>,
    pub errors: Vec<ShownError>,
    pub project_file: Option<PathBuf>,
    pub module_file: Option<PathBuf>,
    pub compile_output: Option<PathBuf>,
    /// SDK the project ends up with.
    pub sdk: Option<String>,
    /// Newest registered SDK suitable for the chosen builder.
    pub suggested_sdk: Option<String>,
}

/// Build the wizard described by `script` and replay its actions.
///
/// Actions after the wizard closed are an error.
pub fn run_script(script: &Script, config: &WizardConfig) -> Result<Transcript> {
    let journal = Journal::default();
    let mut wizard = build_wizard(script, config, &journal)?;

    let mut actions = Vec::with_capacity(script.actions.len());
    for (index, action) in script.actions.iter().enumerate() {
        let outcome = apply_action(&mut wizard, action)
            .with_context(|| format!("action {} ('{}')", index, action))?;
        actions.push(ActionRecord {
            action: action.to_string(),
            outcome,
            current: wizard.current_step_name().to_string(),
        });
    }

    let conventions = config.conventions();
    let ctx = wizard.context();
    let sdk = resolve_project_sdk(ctx, script.default_project_sdk.as_ref())
        .map(|sdk| sdk.name.clone());
    let suggested_sdk =
        most_recent_suitable_sdk(ctx, &script.sdks).map(|sdk| sdk.name.clone());
    let project_file = wizard.new_project_file_path(&conventions);
    let module_file = wizard.module_file_path(&conventions);
    let compile_output = wizard.new_compile_output(&conventions);
    let title = wizard.title().to_string();
    let status = wizard.status();
    let current = wizard.current_step_name().to_string();
    let active_mode = wizard.active_mode().map(str::to_string);
    let navigation = wizard.navigation_state();
    let errors = wizard.view().errors.clone();
    // Dropping an open wizard disposes its steps; keep that in the journal.
    drop(wizard);

    info!(?status, actions = actions.len(), "script replayed");
    Ok(Transcript {
        title,
        actions,
        status,
        current,
        active_mode,
        navigation,
        hooks: journal.calls(),
        errors,
        project_file,
        module_file,
        compile_output,
        sdk,
        suggested_sdk,
    })
}

fn build_wizard(
    script: &Script,
    config: &WizardConfig,
    journal: &Journal,
) -> Result<Wizard<RecordingView>> {
    let context = WizardContext::new(script.project.clone());
    let mut builder = if script.flat {
        let steps: Vec<Box<dyn Step>> = script
            .steps
            .iter()
            .map(|spec| {
                Box::new(ScriptedStep::new(spec.clone(), journal.clone())) as Box<dyn Step>
            })
            .collect();
        WizardBuilder::flat(context, steps)
    } else {
        let mut modes: Vec<Box<dyn Mode>> = Vec::with_capacity(script.modes.len());
        for mode in &script.modes {
            let specs = mode
                .steps
                .iter()
                .map(|id| {
                    script
                        .step(id)
                        .cloned()
                        .ok_or_else(|| anyhow!("mode '{}': unknown step '{}'", mode.name, id))
                })
                .collect::<Result<Vec<StepSpec>>>()?;
            modes.push(Box::new(ScriptedMode::new(
                mode.name.clone(),
                mode.help_id.clone(),
                specs,
                journal.clone(),
            )));
        }
        WizardBuilder::with_modes(context, modes)
            .root_page(Box::new(ModeChoiceStep::new(script.root_help_id.clone())))
    };

    builder = builder
        .modules(Box::new(script.modules.clone()))
        .options(config.controller_options());
    if let Some(title) = &script.title {
        builder = builder.title(title.clone());
    }
    if let Some(path) = &script.default_path {
        builder = builder.default_path(path.clone());
    }
    builder.build(RecordingView::default()).context("build wizard")
}

fn apply_action(wizard: &mut Wizard<RecordingView>, action: &Action) -> Result<ActionOutcome> {
    let outcome = match action {
        Action::Next => ActionOutcome::Transition(wizard.advance()?),
        Action::Back => ActionOutcome::Transition(wizard.retreat()?),
        Action::Finish => ActionOutcome::Finish(wizard.finish()?),
        Action::Cancel => {
            wizard.cancel()?;
            ActionOutcome::Cancelled
        }
        Action::Jump(target) => {
            let found = wizard.navigate_to(|_, step| step.name() == target.as_str())?;
            ActionOutcome::Jumped { found }
        }
        Action::Mode(name) => {
            wizard.select_mode(name)?;
            ActionOutcome::ModeSelected
        }
        Action::RequestNext => {
            wizard.context_mut().request_next_step();
            wizard.process_events()?;
            ActionOutcome::EventsProcessed
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::StayReason;
    use crate::io::init::SAMPLE_SCRIPT;
    use crate::io::script_store::parse_script;
    use crate::scripted::Hook;

    fn run(raw: &str) -> Result<Transcript> {
        let script = parse_script(raw).expect("valid script");
        run_script(&script, &WizardConfig::default())
    }

    #[test]
    fn sample_script_finishes_with_derived_paths() {
        let transcript = run(SAMPLE_SCRIPT).expect("run");
        assert_eq!(transcript.status, WizardStatus::Finished);
        assert_eq!(transcript.title, "New Project");
        assert_eq!(transcript.current, "builder");
        // Directory-based storage: the project is the directory itself.
        assert_eq!(
            transcript.project_file,
            Some(PathBuf::from("/work/projects/demo"))
        );
        assert_eq!(
            transcript.compile_output,
            Some(PathBuf::from("/work/projects/demo/out"))
        );
        assert_eq!(transcript.sdk.as_deref(), Some("jdk-17"));
        assert_eq!(transcript.suggested_sdk.as_deref(), Some("jdk-21"));
        assert!(transcript.errors.is_empty());
    }

    #[test]
    fn layout_step_appears_only_for_directory_storage() {
        let transcript = run(SAMPLE_SCRIPT).expect("run");
        let visited: Vec<&str> = transcript
            .actions
            .iter()
            .map(|record| record.current.as_str())
            .collect();
        assert_eq!(visited, vec!["name", "storage", "layout", "builder"]);
    }

    #[test]
    fn validation_error_keeps_wizard_open() {
        let transcript = run(
            r#"
actions = ["mode import", "next", "next"]

[[step]]
id = "name"

[[step]]
id = "sources"
valid = false
validation_error = "Choose a source directory"

[[step]]
id = "review"

[[mode]]
name = "empty"
steps = ["name"]

[[mode]]
name = "import"
steps = ["sources", "review"]
"#,
        )
        .expect("run");
        assert_eq!(transcript.status, WizardStatus::Open);
        assert_eq!(transcript.active_mode.as_deref(), Some("import"));
        assert_eq!(transcript.current, "sources");
        assert_eq!(
            transcript.actions[2].outcome,
            ActionOutcome::Transition(Transition::Stayed {
                at: crate::core::types::StepId(2),
                reason: StayReason::ValidationFailed,
            })
        );
        assert_eq!(transcript.errors[0].message, "Choose a source directory");
        // Dropping the open wizard still disposes every step.
        let disposed = transcript
            .hooks
            .iter()
            .filter(|call| call.hook == Hook::Dispose)
            .count();
        assert_eq!(disposed, 3);
    }

    #[test]
    fn flat_script_walks_steps_in_order() {
        let transcript = run(
            r#"
flat = true
actions = ["back", "next", "jump a", "cancel"]

[[step]]
id = "a"

[[step]]
id = "b"
"#,
        )
        .expect("run");
        assert_eq!(transcript.status, WizardStatus::Cancelled);
        assert_eq!(transcript.current, "a");
        assert_eq!(transcript.active_mode, None);
        assert_eq!(transcript.actions[2].outcome, ActionOutcome::Jumped { found: true });
    }

    #[test]
    fn existing_project_gets_module_title_and_project_sdk() {
        let transcript = run(
            r#"
flat = true
default_path = "/work/app/core"
actions = ["finish"]

[project]
name = "app"
base_dir = "/work/app"

[project.sdk]
name = "jdk-11"
sdk_type = "jdk"
version = "11.0.20"

[[step]]
id = "module"
"#,
        )
        .expect("run");
        assert_eq!(transcript.title, "Add Module");
        assert_eq!(transcript.sdk.as_deref(), Some("jdk-11"));
        assert_eq!(transcript.suggested_sdk, None);
        assert_eq!(
            transcript.module_file,
            Some(PathBuf::from("/work/app/core/core.iml"))
        );
    }

    #[test]
    fn actions_after_close_fail() {
        let err = run(
            r#"
flat = true
actions = ["cancel", "next"]

[[step]]
id = "a"
"#,
        )
        .expect_err("closed");
        let message = format!("{:#}", err);
        assert!(message.contains("action 1 ('next')"), "{message}");
        assert!(message.contains("already closed"), "{message}");
    }

    #[test]
    fn request_next_moves_like_next() {
        let transcript = run(
            r#"
actions = ["request-next", "request-next"]

[[step]]
id = "a"

[[step]]
id = "b"

[[mode]]
name = "empty"
steps = ["a", "b"]
"#,
        )
        .expect("run");
        assert_eq!(transcript.current, "b");
        assert_eq!(transcript.actions[1].outcome, ActionOutcome::EventsProcessed);
    }
}
