use tracing::{debug, warn};

use crate::error::{FailureReason, SubmitError, ValidationError};
use crate::form::RegistrationForm;
use crate::model::StoredRegistration;
use crate::store::RegistrationStore;
use crate::verify::{PendingChallenge, PhoneVerifier, Verified};

/// Observable states of a submission attempt.
///
/// `Verifying` only exists while a `submit_code` call is in flight; between
/// calls the machine rests in one of the other four states. `Failed` is
/// terminal but recoverable: `send_code` restarts the OTP cycle from any
/// resting state, and `re_enter_code` returns from a bad-code failure to
/// `OtpPending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Editing,
    OtpPending,
    Verifying,
    Completed,
    Failed(FailureReason),
}

/// The registration submission workflow.
///
/// Owns the form fields and orchestrates field validation, OTP issuance,
/// OTP confirmation and persistence against the two collaborator traits.
/// Independent of any HTTP or rendering environment; stateless callers can
/// rebuild one mid-flight with [`SubmissionWorkflow::resume`].
pub struct SubmissionWorkflow<V, S> {
    verifier: V,
    store: S,
    form: RegistrationForm,
    challenge: Option<PendingChallenge>,
    state: WorkflowState,
}

impl<V, S> SubmissionWorkflow<V, S>
where
    V: PhoneVerifier,
    S: RegistrationStore,
{
    pub fn new(verifier: V, store: S) -> Self {
        Self {
            verifier,
            store,
            form: RegistrationForm::default(),
            challenge: None,
            state: WorkflowState::Editing,
        }
    }

    /// Rebuild a workflow that already holds an issued challenge, in the
    /// `OtpPending` state.
    pub fn resume(verifier: V, store: S, form: RegistrationForm, challenge: PendingChallenge) -> Self {
        Self {
            verifier,
            store,
            form,
            challenge: Some(challenge),
            state: WorkflowState::OtpPending,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Field edits are allowed in any resting state; preconditions are
    /// re-checked at both transition points.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Return to `Editing`, keeping the entered fields. Drops any issued
    /// challenge, so recovery continues with a fresh OTP cycle.
    pub fn reset(&mut self) {
        self.challenge = None;
        self.state = WorkflowState::Editing;
    }

    /// `Failed(bad-code)` → `OtpPending`: the issued challenge is still
    /// confirmable, let the user try another code.
    pub fn re_enter_code(&mut self) -> Result<(), SubmitError> {
        match (self.state, &self.challenge) {
            (WorkflowState::Failed(FailureReason::BadCode), Some(_)) => {
                self.state = WorkflowState::OtpPending;
                Ok(())
            }
            _ => Err(SubmitError::InvalidState("failed")),
        }
    }

    /// `Editing → OtpPending`: validate every field, then request an OTP
    /// challenge for the entered mobile number.
    ///
    /// A validation failure makes no backend call and leaves the machine in
    /// `Editing` with the fields intact. A provider failure moves to
    /// `Failed(challenge-request-failed)`, also with no field data lost.
    /// Calling this from a `Failed` or `OtpPending` state restarts the cycle.
    pub async fn send_code(&mut self) -> Result<PendingChallenge, SubmitError> {
        self.challenge = None;
        self.state = WorkflowState::Editing;

        self.form.validate()?;

        match self.verifier.request_challenge(&self.form.mobile).await {
            Ok(challenge) => {
                debug!(mobile = %self.form.mobile, "otp challenge issued");
                self.challenge = Some(challenge.clone());
                self.state = WorkflowState::OtpPending;
                Ok(challenge)
            }
            Err(e) => {
                warn!(error = %e, "otp challenge request failed");
                self.state = WorkflowState::Failed(FailureReason::ChallengeRequestFailed);
                Err(e.into())
            }
        }
    }

    /// `OtpPending → Verifying → Completed`: confirm the entered code, then
    /// persist the record with `phone_verified` set.
    ///
    /// Preconditions are re-checked first (the fields may have been edited
    /// after the OTP was sent); a precondition failure leaves the machine in
    /// `OtpPending`. A wrong or expired code moves to `Failed(bad-code)`. A
    /// store failure moves to `Failed(persist-failed)`; the confirmed
    /// challenge is single-use, so recovery restarts the whole OTP cycle.
    /// `append` is called at most once per successful confirmation and is
    /// never retried automatically.
    ///
    /// On success the assigned identifier is returned and the workflow is
    /// ready for a new submission with cleared fields.
    pub async fn submit_code(&mut self, code: &str) -> Result<StoredRegistration, SubmitError> {
        if self.state != WorkflowState::OtpPending {
            return Err(SubmitError::InvalidState(state_name(self.state)));
        }
        let Some(challenge) = self.challenge.clone() else {
            return Err(SubmitError::InvalidState("otp-pending"));
        };

        if code.trim().is_empty() {
            return Err(ValidationError::EmptyField("OTP").into());
        }
        let mut record = self.form.validate()?;

        self.state = WorkflowState::Verifying;

        let Verified = match self.verifier.confirm_challenge(&challenge, code).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "otp confirmation failed");
                self.state = WorkflowState::Failed(FailureReason::BadCode);
                return Err(e.into());
            }
        };

        record.phone_verified = true;

        match self.store.append(record).await {
            Ok(stored) => {
                debug!(registration_number = %stored.registration_number, "registration persisted");
                self.form = RegistrationForm::default();
                self.challenge = None;
                self.state = WorkflowState::Completed;
                Ok(stored)
            }
            Err(e) => {
                warn!(error = %e, "registration persistence failed");
                self.challenge = None;
                self.state = WorkflowState::Failed(FailureReason::PersistFailed);
                Err(e.into())
            }
        }
    }
}

fn state_name(state: WorkflowState) -> &'static str {
    match state {
        WorkflowState::Editing => "editing",
        WorkflowState::OtpPending => "otp-pending",
        WorkflowState::Verifying => "verifying",
        WorkflowState::Completed => "completed",
        WorkflowState::Failed(_) => "failed",
    }
}
