use std::collections::BTreeSet;
use tracing::debug;
use web_common::RestaurantDto;

use crate::draft::{DraftEntity, DraftPatch, FormStore};
use crate::errors::{SubmissionError, WizardError};
use crate::validation::{validate, FieldErrors, StepId, ValidationResult};

/// Coarse lifecycle of one wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    /// A step form is shown and editable.
    #[default]
    Editing,
    /// The create request is awaiting its response.
    Submitting,
    /// The restaurant was created. The draft has been discarded.
    Completed,
    /// The session was torn down (credential rejected). The draft has been discarded.
    Failed,
}

/// Step, phase and the errors currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    step: StepId,
    phase: WizardPhase,
    errors: FieldErrors,
    /// Keys in `errors` that came back from the server. Only an edit of the
    /// field removes them.
    server_fields: BTreeSet<String>,
    banner: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: StepId::FIRST,
            phase: WizardPhase::Editing,
            errors: FieldErrors::new(),
            server_fields: BTreeSet::new(),
            banner: None,
        }
    }
}

impl WizardState {
    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    /// All field errors, across steps.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// True when the entry for `field` was reported by the server.
    pub fn is_server_error(&self, field: &str) -> bool {
        self.server_fields.contains(field)
    }

    /// Errors owned by the step on screen.
    pub fn step_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(field, _)| self.step.owns(field))
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect()
    }

    /// Global message above the form, e.g. a failed submission.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Forward navigation is possible: editing and no error on the current step.
    pub fn can_advance(&self) -> bool {
        self.phase == WizardPhase::Editing && self.step_errors().is_empty()
    }
}

/// Result of [`WizardController::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { from: StepId, to: StepId },
    /// The last step validated; there is nowhere further to go.
    AtLastStep,
    Blocked(FieldErrors),
    /// Not editing (submitting, completed or failed).
    Ignored,
}

/// Synchronous wizard state machine.
///
/// Owns the [`FormStore`] and the [`WizardState`]. Every transition clears
/// the banner first.
#[derive(Debug, Clone, Default)]
pub struct WizardController {
    store: FormStore,
    state: WizardState,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session on a pre-filled draft.
    pub fn with_draft(draft: DraftEntity) -> Self {
        Self {
            store: FormStore::with_draft(draft),
            state: WizardState::default(),
        }
    }

    pub fn draft(&self) -> &DraftEntity {
        self.store.draft()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    /// Merges an edit and clears the errors of the fields it changed.
    pub fn edit(&mut self, patch: DraftPatch) -> &DraftEntity {
        let before = self.store.snapshot();
        self.store.merge(patch);
        for field in before.changed_fields(self.store.draft()) {
            self.state.errors.remove(&field);
            self.state.server_fields.remove(&field);
            // Server keys may name a whole group, e.g. `openingHours` or `menuItems[0]`.
            let covered: Vec<String> = self
                .state
                .server_fields
                .iter()
                .filter(|key| covers(key, &field))
                .cloned()
                .collect();
            for key in covered {
                self.state.errors.remove(&key);
                self.state.server_fields.remove(&key);
            }
        }
        self.store.draft()
    }

    /// Validates the current step and moves forward when it passes.
    pub fn next(&mut self) -> StepOutcome {
        self.state.banner = None;
        if self.state.phase != WizardPhase::Editing {
            return StepOutcome::Ignored;
        }

        let step = self.state.step;
        match validate(step, self.store.draft()) {
            ValidationResult::Valid => {
                self.clear_step_errors(step);
                let pending = self.state.step_errors();
                if !pending.is_empty() {
                    debug!(step = %step, errors = pending.len(), "wizard blocked by server errors");
                    return StepOutcome::Blocked(pending);
                }
                match step.next() {
                    Some(to) => {
                        self.state.step = to;
                        debug!(from = %step, to = %to, "wizard advanced");
                        StepOutcome::Advanced { from: step, to }
                    }
                    None => StepOutcome::AtLastStep,
                }
            }
            ValidationResult::Invalid(errors) => {
                self.publish_step_errors(step, &errors);
                debug!(step = %step, errors = errors.len(), "wizard blocked");
                StepOutcome::Blocked(errors)
            }
        }
    }

    /// Goes back one step, dropping the errors of the step being left.
    /// Returns false at the first step or when not editing.
    pub fn back(&mut self) -> bool {
        self.state.banner = None;
        if self.state.phase != WizardPhase::Editing {
            return false;
        }
        let leaving = self.state.step;
        match leaving.previous() {
            Some(to) => {
                self.clear_step_errors(leaving);
                self.state.step = to;
                debug!(from = %leaving, to = %to, "wizard went back");
                true
            }
            None => false,
        }
    }

    /// Gate for a submission. On success the phase is `Submitting` and the
    /// returned snapshot is what must be sent.
    pub fn begin_submit(&mut self) -> Result<DraftEntity, WizardError> {
        match self.state.phase {
            WizardPhase::Submitting => return Err(WizardError::Busy),
            WizardPhase::Completed | WizardPhase::Failed => return Err(WizardError::Closed),
            WizardPhase::Editing => {}
        }
        self.state.banner = None;

        let step = self.state.step;
        if step != StepId::LAST {
            return Err(WizardError::NotOnLastStep(step));
        }
        if let ValidationResult::Invalid(errors) = validate(step, self.store.draft()) {
            self.publish_step_errors(step, &errors);
            return Err(WizardError::Invalid(errors));
        }

        self.clear_step_errors(step);
        let pending = self.state.step_errors();
        if !pending.is_empty() {
            return Err(WizardError::Invalid(pending));
        }
        self.state.phase = WizardPhase::Submitting;
        debug!("wizard submitting");
        Ok(self.store.snapshot())
    }

    /// Applies the coordinator's verdict.
    pub fn finish_submit(&mut self, outcome: &Result<RestaurantDto, SubmissionError>) {
        // Busy belongs to another in-flight request; this one is still pending.
        if self.state.phase != WizardPhase::Submitting || matches!(outcome, Err(SubmissionError::Busy)) {
            return;
        }
        self.state.banner = None;

        match outcome {
            Ok(_) => {
                self.store.clear();
                self.state.errors.clear();
                self.state.server_fields.clear();
                self.state.phase = WizardPhase::Completed;
            }
            Err(SubmissionError::ValidationRejected { message, fields }) => {
                self.apply_server_errors(message, fields);
                self.state.phase = WizardPhase::Editing;
            }
            Err(SubmissionError::Unauthorized(_)) => {
                self.store.clear();
                self.state.errors.clear();
                self.state.server_fields.clear();
                self.state.phase = WizardPhase::Failed;
            }
            Err(SubmissionError::Transient(message)) => {
                self.state.banner = Some(message.clone());
                self.state.phase = WizardPhase::Editing;
            }
            Err(SubmissionError::Busy) => {}
        }
        debug!(phase = ?self.state.phase, "wizard submission finished");
    }

    /// Puts rejected fields on their steps and returns to the earliest one.
    /// Keys that name no input are listed in the banner instead.
    fn apply_server_errors(&mut self, message: &str, rejected: &FieldErrors) {
        let mut earliest: Option<StepId> = None;
        let mut unplaced = Vec::new();
        for (field, reason) in rejected {
            match StepId::of_form_field(field) {
                Some(step) => {
                    earliest = Some(earliest.map_or(step, |e| e.min(step)));
                    self.state.errors.insert(field.clone(), reason.clone());
                    self.state.server_fields.insert(field.clone());
                }
                None => unplaced.push(format!("{}: {}", field, reason)),
            }
        }

        if let Some(step) = earliest {
            if step != self.state.step {
                debug!(from = %self.state.step, to = %step, "wizard returned to rejected step");
                self.state.step = step;
            }
        }
        self.state.banner = Some(if unplaced.is_empty() {
            message.to_string()
        } else {
            format!("{} ({})", message, unplaced.join("; "))
        });
    }

    fn publish_step_errors(&mut self, step: StepId, errors: &FieldErrors) {
        self.clear_step_errors(step);
        for field in errors.keys() {
            self.state.server_fields.remove(field);
        }
        self.state.errors.extend(errors.clone());
    }

    /// Drops the local errors of `step`. Server entries stay until edited.
    fn clear_step_errors(&mut self, step: StepId) {
        let server = &self.state.server_fields;
        self.state
            .errors
            .retain(|field, _| !step.owns(field) || server.contains(field));
    }
}

/// `key` names `field` or a group containing it.
fn covers(key: &str, field: &str) -> bool {
    field
        .strip_prefix(key)
        .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
}
