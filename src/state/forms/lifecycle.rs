//! Submission lifecycle shared by the auth forms
//!
//! `Idle -> Submitting -> Succeeded | Failed`, with `Failed -> Submitting` on
//! retry. At most one submission per form is in flight: `begin` refuses while
//! `Submitting`. Every submission gets a ticket, and a settlement only applies
//! when its ticket matches the one currently outstanding.

use crate::api::ApiError;
use crate::state::events::{AppEvent, EventSender, Receipt};
use chrono::{DateTime, Utc};
use std::future::Future;
use tracing::{debug, info, warn};

use super::rules::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Coarse category of an external-action failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionErrorKind {
    /// The gateway could not be reached
    Unreachable,
    TimedOut,
    /// The gateway answered with a non-success status
    Rejected { status: u16 },
    /// The gateway answered with something unreadable
    Malformed,
}

impl From<&ApiError> for SubmissionErrorKind {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::HttpClientBuild(_) | ApiError::Request(_) => Self::Unreachable,
            ApiError::Timeout => Self::TimedOut,
            ApiError::Status { status, .. } => Self::Rejected { status: *status },
            ApiError::Parse(_) => Self::Malformed,
        }
    }
}

/// What the view sees of a form's submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmissionState {
    pub phase: SubmissionPhase,
    /// Banner text; fixed per form regardless of the underlying cause
    pub error_message: Option<String>,
    pub error_kind: Option<SubmissionErrorKind>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Identifies one in-flight submission of one mounted form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmitTicket {
    pub mount_id: u64,
    pub generation: u64,
}

/// Result of asking a form to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    /// A submission is already in flight, or the form is finished
    Suppressed,
    /// The external action was started under this ticket
    Dispatched(SubmitTicket),
}

impl SubmitAttempt {
    #[cfg(test)]
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionLifecycle {
    state: FormSubmissionState,
    failure_message: &'static str,
    /// Whether `Succeeded` ends the form (no further submissions)
    terminal_on_success: bool,
    mount_id: u64,
    generation: u64,
}

impl SubmissionLifecycle {
    pub fn new(mount_id: u64, failure_message: &'static str) -> Self {
        Self {
            state: FormSubmissionState::default(),
            failure_message,
            terminal_on_success: false,
            mount_id,
            generation: 0,
        }
    }

    /// Make `Succeeded` final
    pub fn terminal_on_success(mut self) -> Self {
        self.terminal_on_success = true;
        self
    }

    pub fn state(&self) -> &FormSubmissionState {
        &self.state
    }

    #[cfg(test)]
    pub fn phase(&self) -> SubmissionPhase {
        self.state.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.state.phase == SubmissionPhase::Submitting
    }

    /// Move to `Submitting` and hand out a ticket, unless that is not allowed
    pub fn begin(&mut self) -> Option<SubmitTicket> {
        match self.state.phase {
            SubmissionPhase::Submitting => {
                debug!(mount_id = self.mount_id, "submit suppressed while in flight");
                return None;
            }
            SubmissionPhase::Succeeded if self.terminal_on_success => {
                debug!(mount_id = self.mount_id, "submit suppressed after terminal success");
                return None;
            }
            _ => {}
        }

        self.generation += 1;
        self.state.phase = SubmissionPhase::Submitting;
        self.state.submitted_at = Some(Utc::now());

        Some(SubmitTicket {
            mount_id: self.mount_id,
            generation: self.generation,
        })
    }

    /// Apply the external action's outcome.
    /// Returns false (and changes nothing) for a ticket that is not outstanding.
    pub fn settle(&mut self, ticket: SubmitTicket, outcome: Result<(), &ApiError>) -> bool {
        let outstanding = self.is_submitting()
            && ticket.mount_id == self.mount_id
            && ticket.generation == self.generation;
        if !outstanding {
            debug!(?ticket, "ignoring settlement for a ticket that is not outstanding");
            return false;
        }

        match outcome {
            Ok(()) => {
                info!(mount_id = self.mount_id, "submission succeeded");
                self.state.phase = SubmissionPhase::Succeeded;
                self.state.error_message = None;
                self.state.error_kind = None;
            }
            Err(err) => {
                warn!(
                    mount_id = self.mount_id,
                    error = %err,
                    rejected = err.is_rejection(),
                    "submission failed"
                );
                self.state.phase = SubmissionPhase::Failed;
                self.state.error_message = Some(self.failure_message.to_string());
                self.state.error_kind = Some(SubmissionErrorKind::from(err));
            }
        }
        true
    }
}

/// Run `action` on the runtime and post its outcome back as a settlement
pub fn dispatch<F>(ticket: SubmitTicket, events: EventSender, action: F)
where
    F: Future<Output = Result<Receipt, ApiError>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = action.await;
        if events.send(AppEvent::Settled { ticket, result }).is_err() {
            debug!(?ticket, "event loop gone; dropping settlement");
        }
    });
}
