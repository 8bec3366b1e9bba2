//! Steps and modes driven by a [`StepSpec`] instead of a UI.
//!
//! Every hook call is recorded in a shared [`Journal`] so runs can be
//! inspected afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::context::WizardContext;
use crate::core::sequence::StepSequence;
use crate::core::types::StepId;
use crate::mode::{Mode, ModulesProvider, StepRegistrar};
use crate::script::StepSpec;
use crate::step::{CommitStepError, ConfigurationError, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    Validate,
    UpdateDataModel,
    Leave,
    UpdateStep,
    /// Non-final commit on Next.
    Commit,
    /// Final commit on Finish.
    Finalize,
    Dispose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookCall {
    pub step: String,
    pub hook: Hook,
}

/// Append-only log of hook calls, shared between steps.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    calls: Rc<RefCell<Vec<HookCall>>>,
}

impl Journal {
    pub fn record(&self, step: &str, hook: Hook) {
        self.calls.borrow_mut().push(HookCall {
            step: step.to_string(),
            hook,
        });
    }

    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, step: &str, hook: Hook) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.step == step && call.hook == hook)
            .count()
    }

    pub fn hooks_for(&self, step: &str) -> Vec<Hook> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.step == step)
            .map(|call| call.hook)
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

pub struct ScriptedStep {
    spec: StepSpec,
    journal: Journal,
    auto_advanced: bool,
}

impl ScriptedStep {
    pub fn new(spec: StepSpec, journal: Journal) -> Self {
        Self {
            spec,
            journal,
            auto_advanced: false,
        }
    }

    fn record(&self, hook: Hook) {
        self.journal.record(&self.spec.id, hook);
    }
}

/// `Some("")` fails silently.
fn commit_result(error: Option<&str>) -> Result<(), CommitStepError> {
    match error {
        None => Ok(()),
        Some("") => Err(CommitStepError::silent()),
        Some(message) => Err(CommitStepError::new(message)),
    }
}

impl Step for ScriptedStep {
    fn name(&self) -> &str {
        &self.spec.id
    }

    fn is_visible(&self, ctx: &WizardContext) -> bool {
        self.spec.visible
            && self
                .spec
                .only_for_storage
                .is_none_or(|scheme| scheme == ctx.storage_scheme())
    }

    fn validate(&mut self, _ctx: &mut WizardContext) -> Result<bool, ConfigurationError> {
        self.record(Hook::Validate);
        if self.spec.valid {
            return Ok(true);
        }
        match &self.spec.validation_error {
            Some(message) => {
                let mut err = ConfigurationError::new(message.clone());
                err.title = self.spec.validation_title.clone();
                Err(err)
            }
            None => Ok(false),
        }
    }

    fn update_data_model(&mut self, ctx: &mut WizardContext) {
        self.record(Hook::UpdateDataModel);
        if !self.spec.writes.is_empty() {
            self.spec.writes.apply(ctx);
            ctx.request_buttons_update();
        }
    }

    fn on_step_leaving(&mut self, _ctx: &mut WizardContext) {
        self.record(Hook::Leave);
    }

    fn update_step(&mut self, ctx: &mut WizardContext) {
        self.record(Hook::UpdateStep);
        if self.spec.auto_advance && !self.auto_advanced {
            self.auto_advanced = true;
            ctx.request_next_step();
        }
    }

    fn commit(
        &mut self,
        _ctx: &mut WizardContext,
        final_pass: bool,
    ) -> Result<(), CommitStepError> {
        if final_pass {
            self.record(Hook::Finalize);
            commit_result(self.spec.commit_error.as_deref())
        } else {
            self.record(Hook::Commit);
            commit_result(self.spec.advance_commit_error.as_deref())
        }
    }

    fn dispose_resources(&mut self) {
        self.record(Hook::Dispose);
    }

    fn help_id(&self) -> Option<&str> {
        self.spec.help_id.as_deref()
    }
}

/// A mode whose sequence is a fixed list of scripted steps.
pub struct ScriptedMode {
    name: String,
    help_id: Option<String>,
    pending: Vec<StepSpec>,
    registered: Vec<StepId>,
    journal: Journal,
}

impl ScriptedMode {
    pub fn new(
        name: impl Into<String>,
        help_id: Option<String>,
        steps: Vec<StepSpec>,
        journal: Journal,
    ) -> Self {
        Self {
            name: name.into(),
            help_id,
            pending: steps,
            registered: Vec::new(),
            journal,
        }
    }
}

impl Mode for ScriptedMode {
    fn name(&self) -> &str {
        &self.name
    }

    fn help_id(&self) -> Option<&str> {
        self.help_id.as_deref()
    }

    fn register_steps(&mut self, _ctx: &WizardContext, registrar: &mut StepRegistrar<'_>) {
        for spec in self.pending.drain(..) {
            let step = ScriptedStep::new(spec, self.journal.clone());
            self.registered.push(registrar.register(Box::new(step)));
        }
    }

    fn steps(&self, _ctx: &WizardContext, _modules: &dyn ModulesProvider) -> Option<StepSequence> {
        if self.registered.is_empty() {
            None
        } else {
            Some(StepSequence::new(self.registered.clone()))
        }
    }
}
