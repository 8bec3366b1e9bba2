//! SDK resolution for the project being created.

use crate::context::{Sdk, WizardContext};

/// SDK the new project will use.
///
/// An explicit choice in the context wins. Otherwise the SDK comes from the
/// project the module is added to, or from the default project settings when
/// a new project is being created.
pub fn resolve_project_sdk<'a>(
    ctx: &'a WizardContext,
    default_project_sdk: Option<&'a Sdk>,
) -> Option<&'a Sdk> {
    if let Some(sdk) = ctx.project_sdk() {
        return Some(sdk);
    }
    match ctx.project() {
        Some(project) => project.sdk.as_ref(),
        None => default_project_sdk,
    }
}

/// Newest registered SDK the chosen builder can work with.
///
/// Only meaningful while creating a new project; returns `None` when a module
/// is added to an existing one.
pub fn most_recent_suitable_sdk<'a>(ctx: &WizardContext, sdks: &'a [Sdk]) -> Option<&'a Sdk> {
    if !ctx.is_creating_new_project() {
        return None;
    }
    let builder = ctx.project_builder();
    sdks.iter()
        .filter(|sdk| builder.is_none_or(|b| b.is_suitable_sdk_type(&sdk.sdk_type)))
        .max_by(|a, b| a.version.cmp(&b.version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ProjectBuilder, ProjectRef};
    use std::path::PathBuf;

    fn sdk(name: &str, ty: &str, version: &str) -> Sdk {
        Sdk {
            name: name.to_string(),
            sdk_type: ty.to_string(),
            version: semver::Version::parse(version).expect("version"),
        }
    }

    #[test]
    fn explicit_sdk_wins_over_project_sdk() {
        let mut ctx = WizardContext::new(Some(ProjectRef {
            name: "p".to_string(),
            base_dir: PathBuf::from("/p"),
            sdk: Some(sdk("old", "jdk", "11.0.0")),
        }));
        ctx.set_project_sdk(Some(sdk("new", "jdk", "21.0.0")));
        assert_eq!(resolve_project_sdk(&ctx, None).map(|s| s.name.as_str()), Some("new"));
    }

    #[test]
    fn new_project_falls_back_to_default_project_sdk() {
        let ctx = WizardContext::new(None);
        let fallback = sdk("default", "jdk", "17.0.0");
        assert_eq!(resolve_project_sdk(&ctx, Some(&fallback)), Some(&fallback));
    }

    #[test]
    fn existing_project_ignores_default_project_sdk() {
        let ctx = WizardContext::new(Some(ProjectRef {
            name: "p".to_string(),
            base_dir: PathBuf::from("/p"),
            sdk: None,
        }));
        let fallback = sdk("default", "jdk", "17.0.0");
        assert_eq!(resolve_project_sdk(&ctx, Some(&fallback)), None);
    }

    #[test]
    fn most_recent_sdk_respects_builder() {
        let mut ctx = WizardContext::new(None);
        ctx.set_project_builder(Some(ProjectBuilder {
            name: "java".to_string(),
            sdk_types: vec!["jdk".to_string()],
        }));
        let sdks = vec![
            sdk("jdk17", "jdk", "17.0.2"),
            sdk("py312", "python", "3.12.0"),
            sdk("jdk21", "jdk", "21.0.1"),
            sdk("jdk8", "jdk", "1.8.0"),
        ];
        let found = most_recent_suitable_sdk(&ctx, &sdks).expect("sdk");
        assert_eq!(found.name, "jdk21");
    }

    #[test]
    fn most_recent_sdk_is_none_when_adding_module() {
        let ctx = WizardContext::new(Some(ProjectRef {
            name: "p".to_string(),
            base_dir: PathBuf::from("/p"),
            sdk: None,
        }));
        let sdks = vec![sdk("jdk21", "jdk", "21.0.1")];
        assert_eq!(most_recent_suitable_sdk(&ctx, &sdks), None);
    }
}
