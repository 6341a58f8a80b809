//! Multi-step form wizard controller.
//!
//! [`WizardController`] owns the form answers, the current section index and the submission
//! state. Every operation that changes what the user sees takes the rendering surface as an
//! explicit argument; nothing here is global.
//!
//! Navigation:
//! - `advance` validates the current section and moves forward by one.
//! - `retreat` moves back by one without validating (clamped at the first section).
//! - On the last section the forward button reads "Calculate" and is routed to `submit`.
//!
//! Submission re-validates every section, then posts the flat name -> value map to the results
//! endpoint. At most one submission is outstanding at a time.

pub mod surface;
pub mod validation;

use log::{debug, error, info, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::api::results::{ResultsTransport, SubmitError};
use crate::models::form::{FieldKind, Form, FormDefinition, Section};
use crate::models::requests::ResultsSubmission;
use crate::models::responses::ResultsResponse;
use crate::utils::logging::mask_payload_for_log;

use surface::{FormSurface, NextButton, Notice};
use validation::{section_summary, validate_section};

pub const MSG_INCOMPLETE_FORM: &str = "Please complete all required fields before submitting.";
pub const MSG_SUBMIT_FAILED: &str = "There was an error submitting the form. Please try again.";
pub const MSG_SUBMIT_PENDING: &str = "Your answers are already being submitted. Please wait.";
pub const MSG_SUBMIT_ACCEPTED: &str = "Your answers were submitted.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("form has no sections")]
    NoSections,
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not an option of field '{field}'")]
    InvalidOption { field: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    /// The current section did not validate; nothing moved.
    Blocked,
    /// Already on the last section; the forward action is a submission.
    ReadyToSubmit,
    /// Already on the first section.
    AtStart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server asked the client to navigate to this URL.
    Redirected(String),
    /// The server accepted the answers without a redirect.
    Accepted,
    Invalid { failed_sections: Vec<usize> },
    AlreadySubmitting,
    Failed(SubmitError),
}

#[derive(Debug)]
pub struct WizardController {
    form: Form,
    current_section: usize,
    submission: SubmissionState,
    correlation_id: Option<Uuid>,
}

impl WizardController {
    pub fn new(form: Form) -> Result<Self, WizardError> {
        if form.sections.is_empty() {
            return Err(WizardError::NoSections);
        }
        Ok(Self {
            form,
            current_section: 0,
            submission: SubmissionState::Idle,
            correlation_id: None,
        })
    }

    pub fn from_definition(def: FormDefinition) -> Result<Self, WizardError> {
        Self::new(Form::from_definition(def))
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn current_section(&self) -> usize {
        self.current_section
    }

    pub fn total_sections(&self) -> usize {
        self.form.sections.len()
    }

    pub fn section(&self) -> &Section {
        &self.form.sections[self.current_section]
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section + 1 == self.total_sections()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    pub fn correlation_id(&self) -> Option<Uuid> {
        self.correlation_id
    }

    pub fn progress_percent(&self) -> f64 {
        ((self.current_section + 1) as f64 / self.total_sections() as f64) * 100.0
    }

    pub fn next_button(&self) -> NextButton {
        if self.is_last_section() {
            NextButton::Calculate
        } else {
            NextButton::Next
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.form.field(name).map(|f| f.value.as_str())
    }

    /// Set a field's answer. Select fields only accept one of their option values.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), WizardError> {
        let field = self
            .form
            .field_mut(name)
            .ok_or_else(|| WizardError::UnknownField(name.to_string()))?;
        let value = value.into();
        if field.kind() == FieldKind::Select && !field.spec.options.iter().any(|o| o.value == value)
        {
            return Err(WizardError::InvalidOption {
                field: name.to_string(),
                value,
            });
        }
        field.value = value;
        Ok(())
    }

    pub fn cycle_option(&mut self, name: &str, step: isize) -> Result<(), WizardError> {
        let field = self
            .form
            .field_mut(name)
            .ok_or_else(|| WizardError::UnknownField(name.to_string()))?;
        field.cycle_option(step);
        Ok(())
    }

    /// Flat name -> value map of every field in the form.
    pub fn payload(&self) -> ResultsSubmission {
        ResultsSubmission::new(self.form.values())
    }

    /// Push the current state to the surface: section visibility, progress, buttons.
    pub fn render(&self, surface: &mut dyn FormSurface) {
        for index in 0..self.total_sections() {
            surface.show_section(index, index == self.current_section);
        }
        surface.set_progress(self.progress_percent());
        surface.set_back_visible(self.current_section > 0);
        surface.set_next_button(self.next_button());
    }

    /// Validate the fields of the current section. Clears earlier messages first.
    pub fn validate_current_section(&self, surface: &mut dyn FormSurface) -> bool {
        surface.clear_validation();
        self.validate_section_at(self.current_section, surface)
    }

    fn validate_section_at(&self, index: usize, surface: &mut dyn FormSurface) -> bool {
        let section = &self.form.sections[index];
        let failures = validate_section(section);
        for failure in &failures {
            surface.mark_invalid(&failure.field, failure.message);
        }

        if failures.is_empty() {
            return true;
        }

        debug!(
            "[PHASE: wizard] [STEP: validate] Section '{}' has {} problem(s)",
            section.title,
            failures.len()
        );
        surface.notify(Notice::warning(section_summary(&section.title)));
        false
    }

    pub fn advance(&mut self, surface: &mut dyn FormSurface) -> Step {
        if self.is_last_section() {
            return Step::ReadyToSubmit;
        }
        if !self.validate_current_section(surface) {
            return Step::Blocked;
        }

        self.current_section += 1;
        debug!(
            "[PHASE: wizard] [STEP: advance] Now on section {}/{}",
            self.current_section + 1,
            self.total_sections()
        );
        self.render(surface);
        Step::Moved(self.current_section)
    }

    pub fn retreat(&mut self, surface: &mut dyn FormSurface) -> Step {
        if self.current_section == 0 {
            return Step::AtStart;
        }

        self.current_section -= 1;
        debug!(
            "[PHASE: wizard] [STEP: retreat] Now on section {}/{}",
            self.current_section + 1,
            self.total_sections()
        );
        self.render(surface);
        Step::Moved(self.current_section)
    }

    /// First half of a submission: guard against a pending request, validate every section
    /// and build the payload. On success the controller is `Submitting` until
    /// [`finish_submission`](Self::finish_submission) is called.
    pub fn begin_submission(
        &mut self,
        surface: &mut dyn FormSurface,
    ) -> Result<ResultsSubmission, SubmitOutcome> {
        if self.submission == SubmissionState::Submitting {
            warn!("[PHASE: submit] [STEP: guard] Submission already in progress; ignoring trigger");
            surface.notify(Notice::info(MSG_SUBMIT_PENDING));
            return Err(SubmitOutcome::AlreadySubmitting);
        }

        surface.clear_validation();
        let mut failed_sections = Vec::new();
        for index in 0..self.total_sections() {
            self.current_section = index;
            if !self.validate_section_at(index, surface) {
                failed_sections.push(index);
            }
        }

        if let Some(&first) = failed_sections.first() {
            warn!(
                "[PHASE: submit] [STEP: validate] Blocked: {} section(s) incomplete",
                failed_sections.len()
            );
            self.current_section = first;
            self.render(surface);
            surface.notify(Notice::error(MSG_INCOMPLETE_FORM));
            return Err(SubmitOutcome::Invalid { failed_sections });
        }

        let payload = self.payload();
        let correlation_id = Uuid::new_v4();
        self.submission = SubmissionState::Submitting;
        self.correlation_id = Some(correlation_id);
        info!(
            "[PHASE: submit] [STEP: start] correlation_id={} payload={}",
            correlation_id,
            mask_payload_for_log(&payload.fields)
        );
        Ok(payload)
    }

    /// Second half of a submission: apply the server's answer.
    pub fn finish_submission(
        &mut self,
        result: Result<ResultsResponse, SubmitError>,
        surface: &mut dyn FormSurface,
    ) -> SubmitOutcome {
        self.submission = SubmissionState::Idle;
        let correlation_id = self
            .correlation_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string());

        match result {
            Ok(resp) => {
                if let Some(message) = resp.server_error() {
                    warn!(
                        "[PHASE: submit] [STEP: reply] correlation_id={} success={:?} server error: {}",
                        correlation_id, resp.success, message
                    );
                }
                self.apply_reply(&resp, &correlation_id, surface)
            }
            Err(e) => {
                error!(
                    "[PHASE: submit] [STEP: failed] correlation_id={} {}",
                    correlation_id, e
                );
                surface.notify(Notice::error(MSG_SUBMIT_FAILED));
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn apply_reply(
        &self,
        resp: &ResultsResponse,
        correlation_id: &str,
        surface: &mut dyn FormSurface,
    ) -> SubmitOutcome {
        match resp.redirect_target() {
            Some(target) => {
                info!(
                    "[PHASE: submit] [STEP: redirect] correlation_id={} redirect={}",
                    correlation_id, target
                );
                surface.navigate(target);
                SubmitOutcome::Redirected(target.to_string())
            }
            None => {
                info!(
                    "[PHASE: submit] [STEP: done] correlation_id={} accepted without redirect",
                    correlation_id
                );
                surface.notify(Notice::info(MSG_SUBMIT_ACCEPTED));
                SubmitOutcome::Accepted
            }
        }
    }

    /// Validate everything and post the answers through `transport`.
    pub async fn submit<T>(&mut self, transport: &T, surface: &mut dyn FormSurface) -> SubmitOutcome
    where
        T: ResultsTransport + ?Sized,
    {
        let payload = match self.begin_submission(surface) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        let result = transport.post_results(&payload).await;
        self.finish_submission(result, surface)
    }
}
