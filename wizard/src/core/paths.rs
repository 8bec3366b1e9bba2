//! Locations derived from the wizard context once the steps have committed.

use std::path::PathBuf;

use crate::context::{StorageScheme, WizardContext};

/// File naming conventions for project, module and output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConventions {
    pub project_file_extension: String,
    pub module_file_extension: String,
    pub compile_output_dir: String,
}

impl Default for PathConventions {
    fn default() -> Self {
        Self {
            project_file_extension: ".ipr".to_string(),
            module_file_extension: ".iml".to_string(),
            compile_output_dir: "out".to_string(),
        }
    }
}

/// Where the new project is stored.
///
/// With the default storage scheme this is the project file inside the
/// project directory; a directory-based project is identified by the
/// directory itself. `None` until the steps have provided a location.
pub fn new_project_file_path(ctx: &WizardContext, conv: &PathConventions) -> Option<PathBuf> {
    let dir = ctx.project_file_directory()?;
    match ctx.storage_scheme() {
        StorageScheme::Default => {
            let name = ctx.project_name()?;
            Some(dir.join(format!("{}{}", name, conv.project_file_extension)))
        }
        StorageScheme::DirectoryBased => Some(dir.to_path_buf()),
    }
}

/// Module file of the module being created.
pub fn module_file_path(ctx: &WizardContext, conv: &PathConventions) -> Option<PathBuf> {
    let dir = ctx.project_file_directory()?;
    let name = ctx.project_name()?;
    Some(dir.join(format!("{}{}", name, conv.module_file_extension)))
}

/// Compiler output directory: explicit choice, else `<project dir>/<output dir>`.
pub fn new_compile_output(ctx: &WizardContext, conv: &PathConventions) -> Option<PathBuf> {
    if let Some(explicit) = ctx.compiler_output_directory() {
        return Some(explicit.to_path_buf());
    }
    ctx.project_file_directory()
        .map(|dir| dir.join(&conv.compile_output_dir))
}
