//! Modes and the root step that chooses between them.
//!
//! A mode is one branch of the wizard ("empty project", "import sources",
//! ...). It registers its steps once and then answers, for the current
//! context, which of them make up its sequence.

use tracing::debug;

use crate::context::WizardContext;
use crate::core::sequence::StepSequence;
use crate::core::types::StepId;
use crate::error::WizardError;
use crate::step::Step;

/// Names of the modules that already exist in the target project.
pub trait ModulesProvider {
    fn module_names(&self) -> &[String];
}

impl ModulesProvider for Vec<String> {
    fn module_names(&self) -> &[String] {
        self
    }
}

/// Hands out stable ids for steps as modes register them.
pub struct StepRegistrar<'a> {
    steps: &'a mut Vec<Box<dyn Step>>,
}

impl<'a> StepRegistrar<'a> {
    pub(crate) fn new(steps: &'a mut Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    pub fn register(&mut self, step: Box<dyn Step>) -> StepId {
        let id = StepId(self.steps.len());
        debug!(step = step.name(), %id, "registered step");
        self.steps.push(step);
        id
    }
}

pub trait Mode {
    fn name(&self) -> &str;

    fn help_id(&self) -> Option<&str> {
        None
    }

    /// Create this mode's steps. Called exactly once, when the wizard is built.
    fn register_steps(&mut self, ctx: &WizardContext, registrar: &mut StepRegistrar<'_>);

    /// The sequence this mode contributes for the current context, if any.
    fn steps(&self, ctx: &WizardContext, modules: &dyn ModulesProvider) -> Option<StepSequence>;
}

/// Holds the offered modes and the active one.
pub struct ModeSelector {
    modes: Vec<Box<dyn Mode>>,
    active: usize,
}

impl ModeSelector {
    pub fn new(modes: Vec<Box<dyn Mode>>) -> Result<Self, WizardError> {
        if modes.is_empty() {
            return Err(WizardError::NoModes);
        }
        Ok(Self { modes, active: 0 })
    }

    pub fn modes(&self) -> &[Box<dyn Mode>] {
        &self.modes
    }

    pub fn active(&self) -> &dyn Mode {
        self.modes[self.active].as_ref()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch the active mode. Sequences are not rebuilt here; callers
    /// re-query [`ModeSelector::steps`].
    pub fn set_mode(&mut self, index: usize) -> Result<(), WizardError> {
        if index >= self.modes.len() {
            return Err(WizardError::ModeOutOfRange(index));
        }
        if index != self.active {
            debug!(
                from = self.modes[self.active].name(),
                to = self.modes[index].name(),
                "switching mode"
            );
            self.active = index;
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|mode| mode.name() == name)
    }

    /// Sequence of the active mode.
    pub fn steps(&self, ctx: &WizardContext, modules: &dyn ModulesProvider) -> Option<StepSequence> {
        self.active().steps(ctx, modules)
    }

    /// First mode whose current sequence contains `step`.
    pub fn mode_of(
        &self,
        step: StepId,
        ctx: &WizardContext,
        modules: &dyn ModulesProvider,
    ) -> Option<usize> {
        self.modes.iter().position(|mode| {
            mode.steps(ctx, modules)
                .is_some_and(|sequence| sequence.contains(step))
        })
    }

    pub(crate) fn register_all(&mut self, ctx: &WizardContext, registrar: &mut StepRegistrar<'_>) {
        for mode in &mut self.modes {
            mode.register_steps(ctx, registrar);
        }
    }
}

/// Default page for the root step: the list of modes itself has no input to
/// validate or commit.
pub struct ModeChoiceStep {
    help_id: Option<String>,
}

impl ModeChoiceStep {
    pub fn new(help_id: Option<String>) -> Self {
        Self { help_id }
    }
}

impl Step for ModeChoiceStep {
    fn name(&self) -> &str {
        "mode"
    }

    fn help_id(&self) -> Option<&str> {
        self.help_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedMode {
        name: &'static str,
        ids: Vec<StepId>,
    }

    impl Mode for FixedMode {
        fn name(&self) -> &str {
            self.name
        }

        fn register_steps(&mut self, _ctx: &WizardContext, _registrar: &mut StepRegistrar<'_>) {}

        fn steps(&self, _ctx: &WizardContext, _modules: &dyn ModulesProvider) -> Option<StepSequence> {
            if self.ids.is_empty() {
                return None;
            }
            Some(StepSequence::new(self.ids.clone()))
        }
    }

    fn selector() -> ModeSelector {
        ModeSelector::new(vec![
            Box::new(FixedMode {
                name: "empty",
                ids: vec![StepId(1), StepId(2)],
            }),
            Box::new(FixedMode {
                name: "import",
                ids: vec![StepId(3)],
            }),
            Box::new(FixedMode {
                name: "nothing",
                ids: Vec::new(),
            }),
        ])
        .expect("selector")
    }

    #[test]
    fn selector_requires_modes() {
        assert_eq!(ModeSelector::new(Vec::new()).err(), Some(WizardError::NoModes));
    }

    #[test]
    fn set_mode_switches_the_proxied_sequence() {
        let mut selector = selector();
        let ctx = WizardContext::default();
        let modules: Vec<String> = Vec::new();
        assert_eq!(
            selector.steps(&ctx, &modules).map(|s| s.all_steps().to_vec()),
            Some(vec![StepId(1), StepId(2)])
        );
        selector.set_mode(1).expect("set mode");
        assert_eq!(selector.active().name(), "import");
        assert_eq!(
            selector.steps(&ctx, &modules).map(|s| s.all_steps().to_vec()),
            Some(vec![StepId(3)])
        );
        selector.set_mode(2).expect("set mode");
        assert_eq!(selector.steps(&ctx, &modules), None);
    }

    #[test]
    fn set_mode_rejects_out_of_range() {
        let mut selector = selector();
        assert_eq!(selector.set_mode(7), Err(WizardError::ModeOutOfRange(7)));
        assert_eq!(selector.active_index(), 0);
    }

    #[test]
    fn mode_of_finds_owning_mode() {
        let selector = selector();
        let ctx = WizardContext::default();
        let modules: Vec<String> = Vec::new();
        assert_eq!(selector.mode_of(StepId(3), &ctx, &modules), Some(1));
        assert_eq!(selector.mode_of(StepId(0), &ctx, &modules), None);
        assert_eq!(selector.find("import"), Some(1));
    }

    /// Skips its module step when the project already has a "core" module.
    struct ModuleAwareMode;

    impl Mode for ModuleAwareMode {
        fn name(&self) -> &str {
            "module"
        }

        fn register_steps(&mut self, _ctx: &WizardContext, _registrar: &mut StepRegistrar<'_>) {}

        fn steps(&self, _ctx: &WizardContext, modules: &dyn ModulesProvider) -> Option<StepSequence> {
            if modules.module_names().iter().any(|name| name == "core") {
                Some(StepSequence::new(vec![StepId(2)]))
            } else {
                Some(StepSequence::new(vec![StepId(1), StepId(2)]))
            }
        }
    }

    #[test]
    fn modes_read_existing_module_names() {
        let selector = ModeSelector::new(vec![Box::new(ModuleAwareMode)]).expect("selector");
        let ctx = WizardContext::default();
        let existing = vec!["core".to_string()];
        assert_eq!(existing.module_names(), ["core".to_string()].as_slice());
        let with_core = selector.steps(&ctx, &existing).expect("steps");
        assert!(!with_core.contains(StepId(1)));
        let fresh = selector.steps(&ctx, &Vec::<String>::new()).expect("steps");
        assert!(fresh.contains(StepId(1)));
    }
}
