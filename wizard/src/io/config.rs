//! Wizard configuration stored under `.wizard/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::controller::ControllerOptions;
use crate::core::paths::PathConventions;

/// Wizard configuration (TOML).
///
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WizardConfig {
    /// Extension of the project file written for the default storage scheme.
    pub project_file_extension: String,

    pub module_file_extension: String,

    /// Directory under the project root used when no output dir was chosen.
    pub compile_output_dir: String,

    /// Upper bound on context events handled after one navigation request.
    pub max_event_rounds: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        let conventions = PathConventions::default();
        Self {
            project_file_extension: conventions.project_file_extension,
            module_file_extension: conventions.module_file_extension,
            compile_output_dir: conventions.compile_output_dir,
            max_event_rounds: ControllerOptions::default().max_event_rounds,
        }
    }
}

impl WizardConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, ext) in [
            ("project_file_extension", &self.project_file_extension),
            ("module_file_extension", &self.module_file_extension),
        ] {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(anyhow!("{} must look like '.ext', got '{}'", field, ext));
            }
        }
        if self.compile_output_dir.trim().is_empty() {
            return Err(anyhow!("compile_output_dir must not be empty"));
        }
        if self.max_event_rounds == 0 {
            return Err(anyhow!("max_event_rounds must be > 0"));
        }
        Ok(())
    }

    pub fn conventions(&self) -> PathConventions {
        PathConventions {
            project_file_extension: self.project_file_extension.clone(),
            module_file_extension: self.module_file_extension.clone(),
            compile_output_dir: self.compile_output_dir.clone(),
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            max_event_rounds: self.max_event_rounds,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WizardConfig::default()`.
pub fn load_config(path: &Path) -> Result<WizardConfig> {
    if !path.exists() {
        let cfg = WizardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WizardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &WizardConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
