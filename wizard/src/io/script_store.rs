//! Script loading with invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::core::invariants::validate_script;
use crate::script::Script;

/// Load a script from disk and check its invariants.
pub fn load_script(path: &Path) -> Result<Script> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))?;
    parse_script(&contents).with_context(|| format!("load script {}", path.display()))
}

pub fn parse_script(contents: &str) -> Result<Script> {
    let script: Script = toml::from_str(contents).context("parse script toml")?;
    let errors = validate_script(&script);
    if errors.is_empty() {
        return Ok(script);
    }
    Err(anyhow!("script invariants failed: {}", errors.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::init::SAMPLE_SCRIPT;
    use crate::test_support::script_dir;

    #[test]
    fn sample_script_loads() {
        let (_dir, path) = script_dir(SAMPLE_SCRIPT);
        let script = load_script(&path).expect("load");
        assert!(!script.modes.is_empty());
        assert!(!script.actions.is_empty());
    }

    #[test]
    fn invariant_failures_are_reported_together() {
        let err = parse_script(
            r#"
[[step]]
id = "a"

[[step]]
id = "a"
"#,
        )
        .expect_err("invalid");
        let message = format!("{:#}", err);
        assert!(message.contains("duplicate step id 'a'"), "{message}");
        assert!(message.contains("declares no modes"), "{message}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_script(&temp.path().join("nope.toml")).expect_err("missing");
        assert!(format!("{:#}", err).contains("nope.toml"));
    }
}
