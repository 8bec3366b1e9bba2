//! Initialization helpers for `.wizard/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{WizardConfig, write_config};

/// Script written by `wizard init`.
pub const SAMPLE_SCRIPT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/scripts/new_project.toml"
));

/// Canonical paths within `.wizard/` for a project root.
#[derive(Debug, Clone)]
pub struct WizardPaths {
    pub root: PathBuf,
    pub wizard_dir: PathBuf,
    pub config_path: PathBuf,
    pub script_path: PathBuf,
}

impl WizardPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let wizard_dir = root.join(".wizard");
        Self {
            root,
            config_path: wizard_dir.join("config.toml"),
            script_path: wizard_dir.join("wizard.toml"),
            wizard_dir,
        }
    }
}

/// Options for `init_workspace`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing wizard-owned files.
    pub force: bool,
}

/// Create `.wizard/` with a default config and a sample script.
///
/// Fails if `.wizard/` already exists unless `options.force` is set.
pub fn init_workspace(root: &Path, options: &InitOptions) -> Result<WizardPaths> {
    let paths = WizardPaths::new(root);
    if paths.wizard_dir.exists() && !options.force {
        return Err(anyhow!(
            "wizard init: .wizard already exists (use --force to overwrite)"
        ));
    }
    if paths.wizard_dir.exists() && !paths.wizard_dir.is_dir() {
        return Err(anyhow!("wizard init: .wizard exists but is not a directory"));
    }

    fs::create_dir_all(&paths.wizard_dir)
        .with_context(|| format!("create directory {}", paths.wizard_dir.display()))?;
    write_config(&paths.config_path, &WizardConfig::default())?;
    fs::write(&paths.script_path, SAMPLE_SCRIPT)
        .with_context(|| format!("write file {}", paths.script_path.display()))?;
    Ok(paths)
}
