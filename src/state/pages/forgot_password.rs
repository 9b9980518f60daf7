//! Forgot-password page: requests a reset link by email

use super::{PageContext, Settlement};
use crate::api::ApiError;
use crate::state::events::Receipt;
use crate::state::forms::{
    dispatch, email_pattern, FieldRules, FieldValidationRule, FormField, FormModel,
    SubmissionLifecycle, SubmissionPhase, SubmitAttempt, SubmitTicket,
};
use tracing::info;

pub const FAILURE_MESSAGE: &str = "Failed to send reset email. Please try again.";

/// Email field rules shared with the login form
pub(super) fn email_rules() -> Vec<FieldValidationRule> {
    vec![
        FieldValidationRule::required("Email is required"),
        FieldValidationRule::pattern(email_pattern().clone(), "Invalid email address"),
    ]
}

#[derive(Debug, Clone)]
pub struct ForgotPasswordPage {
    pub form: FormModel,
}

impl ForgotPasswordPage {
    pub fn new(mount_id: u64) -> Self {
        let form = FormModel::new(
            vec![FormField::text("email", "Email address")],
            FieldRules::new().field("email", email_rules()),
            SubmissionLifecycle::new(mount_id, FAILURE_MESSAGE),
        );
        Self { form }
    }

    /// The "check your email" view replaces the form once a link was sent
    pub fn link_sent(&self) -> bool {
        self.form.submission().phase == SubmissionPhase::Succeeded
    }

    pub fn submit(&mut self, ctx: &PageContext) -> SubmitAttempt {
        let attempt = self.form.begin_submit();
        if let SubmitAttempt::Dispatched(ticket) = attempt {
            let email = self.form.value("email").to_string();
            info!(?ticket, "requesting password reset link");

            let api = ctx.api.clone();
            dispatch(ticket, ctx.events.clone(), async move {
                api.request_password_reset(&email)
                    .await
                    .map(|()| Receipt::Acknowledged)
            });
        }
        attempt
    }

    pub fn settle(&mut self, ticket: SubmitTicket, result: &Result<Receipt, ApiError>) -> Settlement {
        if self.form.settle(ticket, result.as_ref().map(|_| ())) {
            Settlement::Applied
        } else {
            Settlement::Ignored
        }
    }
}
