//! Navigation controller: next, previous, finish, cancel and jump-to-step.
//!
//! The controller keeps every registered step in one flattened list. In a
//! mode-driven wizard position 0 holds the mode selector's page and the
//! remaining positions hold the steps of all modes in registration order;
//! navigation only ever walks the active mode's sequence. A flat wizard
//! (import flows) has no selector and walks its list in order.
//!
//! User mistakes never surface as `Err`: failed validation or commits are
//! shown through the [`WizardView`] and resolved into a [`Transition`] or
//! [`FinishOutcome`]. `Err(WizardError)` means the wizard was wired wrong or
//! used after it closed.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::context::{ContextEvent, WizardContext};
use crate::core::paths::{self, PathConventions};
use crate::core::sequence::StepSequence;
use crate::core::types::{
    AbortReason, FinishOutcome, NavigationState, StayReason, StepId, Transition, WizardStatus,
};
use crate::error::WizardError;
use crate::mode::{Mode, ModeChoiceStep, ModeSelector, ModulesProvider, StepRegistrar};
use crate::step::Step;
use crate::view::WizardView;

pub const NEW_PROJECT_TITLE: &str = "New Project";
pub const ADD_MODULE_TITLE: &str = "Add Module";

/// Position of the mode selector's page in a mode-driven wizard.
pub const ROOT_STEP: StepId = StepId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Upper bound on context events handled after a single operation.
    pub max_event_rounds: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            max_event_rounds: 64,
        }
    }
}

enum Layout {
    Modes {
        modes: Vec<Box<dyn Mode>>,
        root_page: Option<Box<dyn Step>>,
    },
    Flat {
        steps: Vec<Box<dyn Step>>,
    },
}

/// Assembles a [`Wizard`].
pub struct WizardBuilder {
    context: WizardContext,
    layout: Layout,
    title: Option<String>,
    default_path: Option<String>,
    modules: Box<dyn ModulesProvider>,
    options: ControllerOptions,
}

impl WizardBuilder {
    /// Wizard whose root step chooses between `modes`.
    pub fn with_modes(context: WizardContext, modes: Vec<Box<dyn Mode>>) -> Self {
        Self::new(
            context,
            Layout::Modes {
                modes,
                root_page: None,
            },
        )
    }

    /// Wizard over a fixed list of steps, e.g. one supplied by an importer.
    pub fn flat(context: WizardContext, steps: Vec<Box<dyn Step>>) -> Self {
        Self::new(context, Layout::Flat { steps })
    }

    fn new(context: WizardContext, layout: Layout) -> Self {
        Self {
            context,
            layout,
            title: None,
            default_path: None,
            modules: Box::new(Vec::<String>::new()),
            options: ControllerOptions::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Page shown for the root step. Ignored by flat wizards.
    pub fn root_page(mut self, page: Box<dyn Step>) -> Self {
        if let Layout::Modes { root_page, .. } = &mut self.layout {
            *root_page = Some(page);
        }
        self
    }

    pub fn modules(mut self, modules: Box<dyn ModulesProvider>) -> Self {
        self.modules = modules;
        self
    }

    pub fn options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build<V: WizardView>(self, view: V) -> Result<Wizard<V>, WizardError> {
        let WizardBuilder {
            mut context,
            layout,
            title,
            default_path,
            modules,
            options,
        } = self;

        if let Some(path) = default_path.as_deref() {
            context.seed_default_path(path);
        }
        let title = title.unwrap_or_else(|| default_title(&context).to_string());

        let (steps, selector) = match layout {
            Layout::Modes { modes, root_page } => {
                let mut selector = ModeSelector::new(modes)?;
                let root: Box<dyn Step> = match root_page {
                    Some(page) => page,
                    None => Box::new(ModeChoiceStep::new(None)),
                };
                let mut steps = vec![root];
                selector.register_all(&context, &mut StepRegistrar::new(&mut steps));
                (steps, Some(selector))
            }
            Layout::Flat { steps } => {
                if steps.is_empty() {
                    return Err(WizardError::NoSteps);
                }
                (steps, None)
            }
        };

        info!(
            title = %title,
            steps = steps.len(),
            modes = selector.as_ref().map_or(0, |s| s.modes().len()),
            "wizard opened"
        );

        let mut wizard = Wizard {
            title,
            context,
            steps,
            selector,
            modules,
            view,
            current: StepId(0),
            status: WizardStatus::Open,
            options,
        };
        wizard.show_current()?;
        wizard.settle()?;
        Ok(wizard)
    }
}

fn step_at(steps: &mut [Box<dyn Step>], id: StepId) -> Result<&mut Box<dyn Step>, WizardError> {
    steps.get_mut(id.0).ok_or(WizardError::UnknownStep(id))
}

fn default_title(context: &WizardContext) -> &'static str {
    if context.is_creating_new_project() {
        NEW_PROJECT_TITLE
    } else {
        ADD_MODULE_TITLE
    }
}

/// One open wizard invocation.
pub struct Wizard<V: WizardView> {
    title: String,
    context: WizardContext,
    steps: Vec<Box<dyn Step>>,
    selector: Option<ModeSelector>,
    modules: Box<dyn ModulesProvider>,
    view: V,
    current: StepId,
    status: WizardStatus,
    options: ControllerOptions,
}

impl<V: WizardView> Wizard<V> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn current_step(&self) -> StepId {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step_name(&self, id: StepId) -> Option<&str> {
        self.steps.get(id.0).map(|step| step.name())
    }

    pub fn current_step_name(&self) -> &str {
        self.step_name(self.current).unwrap_or("?")
    }

    /// First registered step with the given name.
    pub fn find_step(&self, name: &str) -> Option<StepId> {
        self.steps
            .iter()
            .position(|step| step.name() == name)
            .map(StepId)
    }

    pub fn context(&self) -> &WizardContext {
        &self.context
    }

    /// Mutable access for collaborators outside the step hooks (e.g. the
    /// root page's UI). Queued events are handled by [`Wizard::process_events`].
    pub fn context_mut(&mut self) -> &mut WizardContext {
        &mut self.context
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn active_mode(&self) -> Option<&str> {
        self.selector.as_ref().map(|selector| selector.active().name())
    }

    pub fn mode_names(&self) -> Vec<&str> {
        self.selector
            .as_ref()
            .map(|selector| selector.modes().iter().map(|mode| mode.name()).collect())
            .unwrap_or_default()
    }

    /// Help topic of the current step. The root step falls back to the
    /// active mode's topic.
    pub fn help_id(&self) -> Option<&str> {
        let step_help = self.steps.get(self.current.0).and_then(|step| step.help_id());
        match &self.selector {
            Some(selector) if self.current == ROOT_STEP => {
                step_help.or_else(|| selector.active().help_id())
            }
            _ => step_help,
        }
    }

    pub fn is_last_step(&self, id: StepId) -> bool {
        self.next_index(id) == id
    }

    pub fn navigation_state(&self) -> NavigationState {
        let is_last = self.is_last_step(self.current);
        NavigationState {
            current: self.current,
            title: self.title.clone(),
            help_id: self.help_id().map(str::to_string),
            can_go_back: self.status == WizardStatus::Open
                && self.previous_index(self.current) != self.current,
            can_go_next: self.status == WizardStatus::Open && !is_last,
            is_last,
            status: self.status,
        }
    }

    pub fn new_project_file_path(&self, conv: &PathConventions) -> Option<PathBuf> {
        paths::new_project_file_path(&self.context, conv)
    }

    pub fn module_file_path(&self, conv: &PathConventions) -> Option<PathBuf> {
        paths::module_file_path(&self.context, conv)
    }

    pub fn new_compile_output(&self, conv: &PathConventions) -> Option<PathBuf> {
        paths::new_compile_output(&self.context, conv)
    }

    /// Commit the current step and move to the next visible one.
    pub fn advance(&mut self) -> Result<Transition, WizardError> {
        self.ensure_open()?;
        self.revalidate_current()?;
        let transition = self.advance_once()?;
        self.settle()?;
        Ok(transition)
    }

    /// Move to the previous visible step. Nothing is validated going back.
    pub fn retreat(&mut self) -> Result<Transition, WizardError> {
        self.ensure_open()?;
        self.revalidate_current()?;
        let from = self.current;
        let to = self.previous_index(from);
        if to == from {
            debug!(step = self.current_step_name(), "already at first step");
            return Ok(Transition::Stayed {
                at: from,
                reason: StayReason::FirstStep,
            });
        }

        step_at(&mut self.steps, from)?.on_step_leaving(&mut self.context);
        self.current = to;
        info!(from = %from, to = %to, step = self.current_step_name(), "moved back");
        self.show_current()?;
        self.settle()?;
        Ok(Transition::Moved { from, to })
    }

    /// Commit and finalize every step from the current one through the last,
    /// then close the wizard.
    ///
    /// The first failure stops the loop and leaves the wizard open at the
    /// failing step. Steps finalized before it are not rolled back, and move
    /// requests queued during the loop are dropped.
    pub fn finish(&mut self) -> Result<FinishOutcome, WizardError> {
        self.ensure_open()?;
        self.revalidate_current()?;
        let mut idx = self.current;
        let outcome = loop {
            if idx != self.current {
                step_at(&mut self.steps, idx)?.update_step(&mut self.context);
            }
            if !self.commit_step_data(idx)? {
                break FinishOutcome::Aborted {
                    at: idx,
                    reason: AbortReason::ValidationFailed,
                };
            }

            let Self {
                steps,
                context,
                view,
                ..
            } = self;
            let step = steps.get_mut(idx.0).ok_or(WizardError::UnknownStep(idx))?;
            step.on_step_leaving(context);
            debug!(step = step.name(), "finalizing step");
            if let Err(err) = step.commit(context, true) {
                if let Some(message) = err.message.as_deref() {
                    view.show_error(None, message);
                }
                break FinishOutcome::Aborted {
                    at: idx,
                    reason: AbortReason::CommitFailed,
                };
            }

            let next = self.next_index(idx);
            if next == idx {
                break FinishOutcome::Finished { last: idx };
            }
            idx = next;
        };

        self.current = idx;
        match outcome {
            FinishOutcome::Finished { .. } => {
                self.close(WizardStatus::Finished);
            }
            FinishOutcome::Aborted { at, reason } => {
                warn!(step = self.current_step_name(), at = %at, ?reason, "finish aborted");
                self.show_current()?;
                self.context.discard_next_step_requests();
                self.settle()?;
            }
        }
        Ok(outcome)
    }

    /// Leave the current step and close the wizard without committing.
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        let current = self.current;
        step_at(&mut self.steps, current)?.on_step_leaving(&mut self.context);
        self.close(WizardStatus::Cancelled);
        Ok(())
    }

    /// Jump to the first registered step matching `predicate`, switching the
    /// active mode when the step belongs to another one.
    ///
    /// Returns `false` when no step matches.
    pub fn navigate_to<P>(&mut self, mut predicate: P) -> Result<bool, WizardError>
    where
        P: FnMut(StepId, &dyn Step) -> bool,
    {
        self.ensure_open()?;
        let mut target = None;
        for (index, step) in self.steps.iter().enumerate() {
            if predicate(StepId(index), &**step) {
                target = Some(StepId(index));
                break;
            }
        }
        let Some(target) = target else {
            return Ok(false);
        };

        if let Some(selector) = self.selector.as_mut() {
            if let Some(mode) = selector.mode_of(target, &self.context, self.modules.as_ref()) {
                if mode != selector.active_index() {
                    selector.set_mode(mode)?;
                }
            }
        }

        self.current = target;
        info!(to = %target, step = self.current_step_name(), "navigated to step");
        self.show_current()?;
        self.settle()?;
        Ok(true)
    }

    /// Switch the active mode by name, e.g. from the root page's UI.
    ///
    /// A current step that is not part of the new mode's sequence is
    /// abandoned in favour of the root step.
    pub fn select_mode(&mut self, name: &str) -> Result<(), WizardError> {
        self.ensure_open()?;
        let selector = self.selector.as_mut().ok_or(WizardError::NoModeSelector)?;
        let index = selector
            .find(name)
            .ok_or_else(|| WizardError::UnknownMode(name.to_string()))?;
        selector.set_mode(index)?;

        if self.is_stale(self.current) {
            self.revalidate_current()?;
        } else {
            self.refresh_view();
        }
        self.settle()
    }

    /// Handle events queued on the context by code outside the step hooks.
    pub fn process_events(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.settle()
    }

    fn advance_once(&mut self) -> Result<Transition, WizardError> {
        let from = self.current;
        if self.is_last_step(from) {
            debug!(step = self.current_step_name(), "already at last step");
            return Ok(Transition::Stayed {
                at: from,
                reason: StayReason::LastStep,
            });
        }
        if !self.commit_step_data(from)? {
            return Ok(Transition::Stayed {
                at: from,
                reason: StayReason::ValidationFailed,
            });
        }

        let Self {
            steps,
            context,
            view,
            ..
        } = self;
        let step = steps.get_mut(from.0).ok_or(WizardError::UnknownStep(from))?;
        step.on_step_leaving(context);
        if let Err(err) = step.commit(context, false) {
            if let Some(message) = err.message.as_deref() {
                view.show_error(None, message);
            }
            return Ok(Transition::Stayed {
                at: from,
                reason: StayReason::CommitFailed,
            });
        }

        // Committing may change visibility, so the target is computed afterwards.
        let to = self.next_index(from);
        if to == from {
            return Ok(Transition::Stayed {
                at: from,
                reason: StayReason::LastStep,
            });
        }
        self.current = to;
        info!(from = %from, to = %to, step = self.current_step_name(), "moved forward");
        self.show_current()?;
        Ok(Transition::Moved { from, to })
    }

    /// Validate the step and flush its page into the context.
    fn commit_step_data(&mut self, id: StepId) -> Result<bool, WizardError> {
        let Self {
            steps,
            context,
            view,
            ..
        } = self;
        let step = steps.get_mut(id.0).ok_or(WizardError::UnknownStep(id))?;
        match step.validate(context) {
            Ok(true) => {}
            Ok(false) => {
                debug!(step = step.name(), "validation rejected input");
                return Ok(false);
            }
            Err(err) => {
                debug!(step = step.name(), error = %err, "validation failed");
                view.show_error(err.title.as_deref(), &err.message);
                return Ok(false);
            }
        }
        step.update_data_model(context);
        Ok(true)
    }

    /// Sequence navigation currently walks.
    fn active_sequence(&self) -> Option<StepSequence> {
        match &self.selector {
            Some(selector) => selector.steps(&self.context, self.modules.as_ref()),
            None => Some((0..self.steps.len()).map(StepId).collect()),
        }
    }

    fn is_visible(&self, id: StepId) -> bool {
        self.steps
            .get(id.0)
            .is_some_and(|step| step.is_visible(&self.context))
    }

    /// Whether `id` is a mode step the active sequence no longer contains.
    fn is_stale(&self, id: StepId) -> bool {
        self.selector.is_some()
            && id != ROOT_STEP
            && !self
                .active_sequence()
                .is_some_and(|sequence| sequence.contains(id))
    }

    /// Fall back to the root step when the current step has dropped out of
    /// the active sequence.
    fn revalidate_current(&mut self) -> Result<(), WizardError> {
        if !self.is_stale(self.current) {
            return Ok(());
        }
        debug!(stale = %self.current, "current step left the active sequence");
        self.current = ROOT_STEP;
        self.show_current()
    }

    /// Next visible step, or `id` itself when there is none (last step).
    fn next_index(&self, id: StepId) -> StepId {
        let Some(sequence) = self.active_sequence() else {
            return id;
        };
        let visible = |candidate: StepId| self.is_visible(candidate);
        let from_root = id == ROOT_STEP || !sequence.contains(id);
        let next = if self.selector.is_some() && from_root {
            sequence.first_visible(visible)
        } else {
            sequence.next_visible(id, visible)
        };
        next.unwrap_or(id)
    }

    /// Previous visible step. Mode-driven wizards fall back to the root step;
    /// flat wizards stay put.
    fn previous_index(&self, id: StepId) -> StepId {
        let fallback = if self.selector.is_some() { ROOT_STEP } else { id };
        let Some(sequence) = self.active_sequence() else {
            return fallback;
        };
        sequence
            .previous_visible(id, |candidate| self.is_visible(candidate))
            .unwrap_or(fallback)
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        match self.status {
            WizardStatus::Open => Ok(()),
            closed => Err(WizardError::Closed(closed)),
        }
    }

    /// Refresh the current step from the context and redraw.
    fn show_current(&mut self) -> Result<(), WizardError> {
        let id = self.current;
        let Self { steps, context, .. } = self;
        let step = steps.get_mut(id.0).ok_or(WizardError::UnknownStep(id))?;
        step.update_step(context);
        self.refresh_view();
        Ok(())
    }

    fn refresh_view(&mut self) {
        let state = self.navigation_state();
        self.view.refresh(&state);
    }

    /// Drain queued context events, one at a time, until the queue is empty.
    fn settle(&mut self) -> Result<(), WizardError> {
        let mut rounds = 0u32;
        while self.status == WizardStatus::Open {
            self.revalidate_current()?;
            let Some(event) = self.context.pop_event() else {
                break;
            };
            rounds += 1;
            if rounds > self.options.max_event_rounds {
                warn!(
                    max_event_rounds = self.options.max_event_rounds,
                    "dropping context events after too many rounds"
                );
                self.context.clear_events();
                break;
            }
            debug!(?event, "handling context event");
            match event {
                ContextEvent::ButtonsUpdateRequested => self.refresh_view(),
                ContextEvent::NextStepRequested => {
                    self.advance_once()?;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, status: WizardStatus) {
        self.status = status;
        self.context.clear_events();
        self.dispose_steps();
        info!(?status, step = self.current_step_name(), "wizard closed");
        self.view.close(status);
    }

    fn dispose_steps(&mut self) {
        for step in &mut self.steps {
            step.dispose_resources();
        }
    }
}

impl<V: WizardView> Drop for Wizard<V> {
    fn drop(&mut self) {
        if self.status == WizardStatus::Open {
            self.dispose_steps();
        }
    }
}
