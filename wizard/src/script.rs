//! Declarative wizard scripts.
//!
//! A script describes the steps and modes of a wizard together with a list
//! of user actions to replay against it. Scripts drive the `wizard` binary
//! and the integration tests.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::context::{ProjectBuilder, ProjectRef, Sdk, StorageScheme, WizardContext};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Overrides the "New Project" / "Add Module" title.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub default_path: Option<String>,
    #[serde(default)]
    pub root_help_id: Option<String>,
    /// Walk `step` entries in order without a mode selector.
    #[serde(default)]
    pub flat: bool,
    /// Modules already present in the target project.
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Existing project; absent when creating a new one.
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// SDK configured for the default project settings.
    #[serde(default)]
    pub default_project_sdk: Option<Sdk>,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepSpec>,
    #[serde(default, rename = "mode")]
    pub modes: Vec<ModeSpec>,
    /// Registered SDKs.
    #[serde(default, rename = "sdk")]
    pub sdks: Vec<Sdk>,
}

impl Script {
    pub fn step(&self, id: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|step| step.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    pub id: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Only visible while the context uses this storage scheme.
    #[serde(default)]
    pub only_for_storage: Option<StorageScheme>,
    #[serde(default = "default_true")]
    pub valid: bool,
    /// Message shown when `valid = false`; without it the step rejects silently.
    #[serde(default)]
    pub validation_error: Option<String>,
    #[serde(default)]
    pub validation_title: Option<String>,
    /// Makes the non-final commit (Next) fail. Empty fails silently.
    #[serde(default)]
    pub advance_commit_error: Option<String>,
    /// Makes the final commit (Finish) fail. Empty fails silently.
    #[serde(default)]
    pub commit_error: Option<String>,
    #[serde(default)]
    pub help_id: Option<String>,
    /// Request Next as soon as the step is first shown.
    #[serde(default)]
    pub auto_advance: bool,
    #[serde(default)]
    pub writes: ContextWrites,
}

impl StepSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: true,
            only_for_storage: None,
            valid: true,
            validation_error: None,
            validation_title: None,
            advance_commit_error: None,
            commit_error: None,
            help_id: None,
            auto_advance: false,
            writes: ContextWrites::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Context fields a step writes when it flushes its page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextWrites {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub project_file_directory: Option<PathBuf>,
    #[serde(default)]
    pub storage_scheme: Option<StorageScheme>,
    #[serde(default)]
    pub builder: Option<ProjectBuilder>,
    #[serde(default)]
    pub sdk: Option<Sdk>,
    #[serde(default)]
    pub compiler_output_directory: Option<PathBuf>,
}

impl ContextWrites {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, ctx: &mut WizardContext) {
        if let Some(name) = &self.project_name {
            ctx.set_project_name(name.clone());
        }
        if let Some(dir) = &self.project_file_directory {
            ctx.set_project_file_directory(dir.clone());
        }
        if let Some(scheme) = self.storage_scheme {
            ctx.set_storage_scheme(scheme);
        }
        if let Some(builder) = &self.builder {
            ctx.set_project_builder(Some(builder.clone()));
        }
        if let Some(sdk) = &self.sdk {
            ctx.set_project_sdk(Some(sdk.clone()));
        }
        if let Some(dir) = &self.compiler_output_directory {
            ctx.set_compiler_output_directory(Some(dir.clone()));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeSpec {
    pub name: String,
    #[serde(default)]
    pub help_id: Option<String>,
    pub steps: Vec<String>,
}

/// One replayed user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Action {
    Next,
    Back,
    Finish,
    Cancel,
    /// Jump to the step with this id (`mode` names the root step).
    Jump(String),
    /// Pick a mode on the root page.
    Mode(String),
    /// A step outside the hook flow asks to move on.
    RequestNext,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (verb, arg) = match raw.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, Some(arg.trim())),
            None => (raw, None),
        };
        match (verb, arg) {
            ("next", None) => Ok(Action::Next),
            ("back" | "previous", None) => Ok(Action::Back),
            ("finish" | "ok", None) => Ok(Action::Finish),
            ("cancel", None) => Ok(Action::Cancel),
            ("request-next", None) => Ok(Action::RequestNext),
            ("jump", Some(target)) if !target.is_empty() => Ok(Action::Jump(target.to_string())),
            ("mode", Some(name)) if !name.is_empty() => Ok(Action::Mode(name.to_string())),
            _ => Err(format!("unknown action '{}'", raw)),
        }
    }
}

impl TryFrom<String> for Action {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => f.write_str("next"),
            Action::Back => f.write_str("back"),
            Action::Finish => f.write_str("finish"),
            Action::Cancel => f.write_str("cancel"),
            Action::RequestNext => f.write_str("request-next"),
            Action::Jump(target) => write!(f, "jump {}", target),
            Action::Mode(name) => write!(f, "mode {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_actions_with_arguments() {
        assert_eq!("next".parse::<Action>(), Ok(Action::Next));
        assert_eq!("ok".parse::<Action>(), Ok(Action::Finish));
        assert_eq!(
            "jump  sdk".parse::<Action>(),
            Ok(Action::Jump("sdk".to_string()))
        );
        assert_eq!(
            "mode import".parse::<Action>(),
            Ok(Action::Mode("import".to_string()))
        );
        assert!("jump".parse::<Action>().is_err());
        assert!("next now".parse::<Action>().is_err());
        assert!("fly".parse::<Action>().is_err());
    }

    #[test]
    fn script_parses_from_toml() {
        let script: Script = toml::from_str(
            r#"
default_path = "/work/demo"
actions = ["next", "mode import", "finish"]

[[step]]
id = "name"
writes = { project_name = "demo" }

[[step]]
id = "layout"
visible = false
only_for_storage = "directory_based"

[[mode]]
name = "empty"
steps = ["name", "layout"]
"#,
        )
        .expect("parse");
        assert_eq!(script.actions.len(), 3);
        assert_eq!(script.actions[1], Action::Mode("import".to_string()));
        let name = script.step("name").expect("step");
        assert!(name.visible);
        assert_eq!(name.writes.project_name.as_deref(), Some("demo"));
        let layout = script.step("layout").expect("step");
        assert_eq!(layout.only_for_storage, Some(StorageScheme::DirectoryBased));
        assert_eq!(script.modes[0].steps, vec!["name", "layout"]);
    }

    #[test]
    fn unknown_action_fails_to_parse() {
        let result: Result<Script, _> = toml::from_str(r#"actions = ["teleport"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn writes_apply_to_context() {
        let writes = ContextWrites {
            project_name: Some("demo".to_string()),
            storage_scheme: Some(StorageScheme::DirectoryBased),
            ..ContextWrites::default()
        };
        assert!(!writes.is_empty());
        let mut ctx = WizardContext::new(None);
        writes.apply(&mut ctx);
        assert_eq!(ctx.project_name(), Some("demo"));
        assert_eq!(ctx.storage_scheme(), StorageScheme::DirectoryBased);
    }
}
