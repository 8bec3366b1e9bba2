//! Shared state threaded through every step of one wizard invocation.
//!
//! The controller owns the context and lends it mutably to step hooks. Steps
//! never talk to the controller directly: they queue [`ContextEvent`]s which
//! the controller drains once the current operation has finished.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the new project is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageScheme {
    /// A single project file next to the sources.
    #[default]
    Default,
    /// A project directory holding several settings files.
    DirectoryBased,
}

/// A registered SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sdk {
    pub name: String,
    pub sdk_type: String,
    pub version: semver::Version,
}

/// The builder chosen to create the project or module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBuilder {
    pub name: String,
    /// SDK types this builder can work with. Empty accepts any type.
    #[serde(default)]
    pub sdk_types: Vec<String>,
}

impl ProjectBuilder {
    pub fn is_suitable_sdk_type(&self, sdk_type: &str) -> bool {
        self.sdk_types.is_empty() || self.sdk_types.iter().any(|ty| ty == sdk_type)
    }
}

/// An already open project the wizard adds a module to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
    pub base_dir: PathBuf,
    #[serde(default)]
    pub sdk: Option<Sdk>,
}

/// Notifications steps send to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextEvent {
    /// Button enablement may have changed; refresh the view.
    ButtonsUpdateRequested,
    /// The current step is complete; move forward as if Next was pressed.
    NextStepRequested,
}

#[derive(Debug, Clone, Default)]
pub struct WizardContext {
    project: Option<ProjectRef>,
    project_file_directory: Option<PathBuf>,
    project_name: Option<String>,
    storage_scheme: StorageScheme,
    project_builder: Option<ProjectBuilder>,
    project_sdk: Option<Sdk>,
    compiler_output_directory: Option<PathBuf>,
    events: VecDeque<ContextEvent>,
}

impl WizardContext {
    /// Context for a wizard that creates a new project (`None`) or adds a
    /// module to `project`.
    pub fn new(project: Option<ProjectRef>) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// Seed the project location from a default path: the directory is the
    /// path itself, the name is its last segment.
    pub fn seed_default_path(&mut self, default_path: &str) {
        self.project_file_directory = Some(PathBuf::from(default_path));
        self.project_name = Some(last_path_segment(default_path).to_string());
        debug!(default_path, name = ?self.project_name, "seeded project location");
    }

    pub fn project(&self) -> Option<&ProjectRef> {
        self.project.as_ref()
    }

    pub fn is_creating_new_project(&self) -> bool {
        self.project.is_none()
    }

    pub fn project_file_directory(&self) -> Option<&Path> {
        self.project_file_directory.as_deref()
    }

    pub fn set_project_file_directory(&mut self, dir: impl Into<PathBuf>) {
        self.project_file_directory = Some(dir.into());
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = Some(name.into());
    }

    pub fn storage_scheme(&self) -> StorageScheme {
        self.storage_scheme
    }

    pub fn set_storage_scheme(&mut self, scheme: StorageScheme) {
        self.storage_scheme = scheme;
    }

    pub fn project_builder(&self) -> Option<&ProjectBuilder> {
        self.project_builder.as_ref()
    }

    pub fn set_project_builder(&mut self, builder: Option<ProjectBuilder>) {
        self.project_builder = builder;
    }

    pub fn project_sdk(&self) -> Option<&Sdk> {
        self.project_sdk.as_ref()
    }

    pub fn set_project_sdk(&mut self, sdk: Option<Sdk>) {
        self.project_sdk = sdk;
    }

    pub fn compiler_output_directory(&self) -> Option<&Path> {
        self.compiler_output_directory.as_deref()
    }

    pub fn set_compiler_output_directory(&mut self, dir: Option<PathBuf>) {
        self.compiler_output_directory = dir;
    }

    pub fn request_buttons_update(&mut self) {
        self.events.push_back(ContextEvent::ButtonsUpdateRequested);
    }

    pub fn request_next_step(&mut self) {
        self.events.push_back(ContextEvent::NextStepRequested);
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn pop_event(&mut self) -> Option<ContextEvent> {
        self.events.pop_front()
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Drop queued [`ContextEvent::NextStepRequested`] events, keeping the rest.
    pub(crate) fn discard_next_step_requests(&mut self) {
        self.events
            .retain(|event| *event != ContextEvent::NextStepRequested);
    }
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
