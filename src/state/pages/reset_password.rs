//! Reset-password page
//!
//! Guarded by the `token` query parameter: without it the page is the
//! invalid-link view and no form exists. On success the page schedules a
//! redirect to the login page, cancelled if the page is torn down first.

use super::{PageContext, Settlement};
use crate::api::ApiError;
use crate::router::{QueryParams, LOGIN_PATH};
use crate::state::events::Receipt;
use crate::state::forms::{
    dispatch, FieldRules, FieldValidationRule, FormField, FormModel, SubmissionLifecycle,
    SubmissionPhase, SubmitAttempt, SubmitTicket,
};
use crate::state::navigation::ScheduledNavigation;
use tracing::{info, warn};

pub const FAILURE_MESSAGE: &str = "Failed to reset password. Please try again.";

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug)]
pub enum ResetPasswordPage {
    /// No usable token; offers a link to request a new one
    InvalidLink,
    Form(ResetPasswordForm),
}

impl ResetPasswordPage {
    pub fn mount(query: &QueryParams, mount_id: u64) -> Self {
        match query.get_non_empty("token") {
            Some(token) => Self::Form(ResetPasswordForm::new(token, mount_id)),
            None => {
                warn!("reset link opened without a token");
                Self::InvalidLink
            }
        }
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&ResetPasswordForm> {
        match self {
            Self::InvalidLink => None,
            Self::Form(form) => Some(form),
        }
    }

    #[cfg(test)]
    pub fn form_mut(&mut self) -> Option<&mut ResetPasswordForm> {
        match self {
            Self::InvalidLink => None,
            Self::Form(form) => Some(form),
        }
    }
}

#[derive(Debug)]
pub struct ResetPasswordForm {
    token: String,
    pub form: FormModel,
    redirect: Option<ScheduledNavigation>,
}

impl ResetPasswordForm {
    pub fn new(token: &str, mount_id: u64) -> Self {
        let rules = FieldRules::new()
            .field(
                "password",
                vec![
                    FieldValidationRule::required("Password is required"),
                    FieldValidationRule::min_length(
                        MIN_PASSWORD_LENGTH,
                        "Password must be at least 8 characters",
                    ),
                ],
            )
            .field(
                "confirm_password",
                vec![
                    FieldValidationRule::required("Please confirm your password"),
                    FieldValidationRule::matches_field("password", "Passwords do not match"),
                ],
            );

        Self {
            token: token.to_string(),
            form: FormModel::new(
                vec![
                    FormField::secret("password", "New Password"),
                    FormField::secret("confirm_password", "Confirm New Password"),
                ],
                rules,
                SubmissionLifecycle::new(mount_id, FAILURE_MESSAGE).terminal_on_success(),
            ),
            redirect: None,
        }
    }

    #[cfg(test)]
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn succeeded(&self) -> bool {
        self.form.submission().phase == SubmissionPhase::Succeeded
    }

    pub fn redirect(&self) -> Option<&ScheduledNavigation> {
        self.redirect.as_ref()
    }

    pub fn submit(&mut self, ctx: &PageContext) -> SubmitAttempt {
        let attempt = self.form.begin_submit();
        if let SubmitAttempt::Dispatched(ticket) = attempt {
            let token = self.token.clone();
            let password = self.form.value("password").to_string();
            info!(?ticket, "confirming password reset");

            let api = ctx.api.clone();
            dispatch(ticket, ctx.events.clone(), async move {
                api.confirm_password_reset(&token, &password)
                    .await
                    .map(|()| Receipt::Acknowledged)
            });
        }
        attempt
    }

    pub fn settle(
        &mut self,
        ticket: SubmitTicket,
        result: &Result<Receipt, ApiError>,
        ctx: &PageContext,
    ) -> Settlement {
        if !self.form.settle(ticket, result.as_ref().map(|_| ())) {
            return Settlement::Ignored;
        }

        if self.succeeded() {
            self.redirect = Some(ScheduledNavigation::schedule(
                ctx.navigator.clone(),
                ticket.mount_id,
                LOGIN_PATH,
                ctx.redirect_delay,
            ));
        }
        Settlement::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAuthApi;
    use crate::router::Location;
    use crate::state::events::AppEvent;
    use crate::state::navigation::RecordingNavigator;
    use crate::state::pages::test_context_with;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn query(location: &str) -> QueryParams {
        Location::parse(location).unwrap().query
    }

    async fn settle_tasks() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    mod guard {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_token_is_invalid_link_without_form() {
            let page = ResetPasswordPage::mount(&query("/auth/reset-password"), 1);
            assert!(matches!(page, ResetPasswordPage::InvalidLink));
            assert!(page.form().is_none());
        }

        #[test]
        fn test_empty_token_is_invalid_link() {
            let page = ResetPasswordPage::mount(&query("/auth/reset-password?token="), 1);
            assert!(matches!(page, ResetPasswordPage::InvalidLink));
        }

        #[test]
        fn test_token_builds_idle_form() {
            let page = ResetPasswordPage::mount(&query("/auth/reset-password?token=abc123"), 1);
            let form = page.form().expect("form constructed");
            assert_eq!(form.token(), "abc123");
            assert_eq!(form.form.submission().phase, SubmissionPhase::Idle);
            assert!(form.redirect().is_none());
        }
    }

    #[tokio::test]
    async fn test_mismatch_blocks_submit() {
        let mut api = MockAuthApi::new();
        api.expect_confirm_password_reset().times(0);
        let (ctx, _rx) = test_context_with(api, Arc::new(RecordingNavigator::default()));

        let mut form = ResetPasswordForm::new("tok", 1);
        form.form.set_value("password", "abcdefgh");
        form.form.set_value("confirm_password", "abcdefgi");

        let attempt = form.submit(&ctx);
        let SubmitAttempt::Invalid(errors) = attempt else {
            panic!("expected Invalid");
        };
        assert_eq!(
            errors.message_for("confirm_password"),
            Some("Passwords do not match")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_redirects_to_login_after_delay() {
        let mut api = MockAuthApi::new();
        api.expect_confirm_password_reset()
            .withf(|token, password| token == "tok" && password == "abcdefgh")
            .times(1)
            .returning(|_, _| Ok(()));
        let navigator = Arc::new(RecordingNavigator::default());
        let (ctx, mut rx) = test_context_with(api, navigator.clone());

        let mut form = ResetPasswordForm::new("tok", 1);
        form.form.set_value("password", "abcdefgh");
        form.form.set_value("confirm_password", "abcdefgh");
        assert!(form.submit(&ctx).is_dispatched());
        assert_eq!(form.submit(&ctx), SubmitAttempt::Suppressed);

        let Some(AppEvent::Settled { ticket, result }) = rx.recv().await else {
            panic!("expected settlement");
        };
        assert_eq!(form.settle(ticket, &result, &ctx), Settlement::Applied);
        assert!(form.succeeded());
        assert_eq!(form.redirect().map(|r| r.path()), Some(LOGIN_PATH));

        tokio::time::advance(ctx.redirect_delay - Duration::from_millis(1)).await;
        settle_tasks().await;
        assert!(navigator.visited().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle_tasks().await;
        assert_eq!(navigator.requests(), vec![(1, LOGIN_PATH.to_string())]);

        // Terminal: no further submissions
        assert_eq!(form.submit(&ctx), SubmitAttempt::Suppressed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_before_delay_cancels_redirect() {
        let mut api = MockAuthApi::new();
        api.expect_confirm_password_reset()
            .returning(|_, _| Ok(()));
        let navigator = Arc::new(RecordingNavigator::default());
        let (ctx, mut rx) = test_context_with(api, navigator.clone());

        let mut page = ResetPasswordPage::mount(&query("/auth/reset-password?token=tok"), 1);
        let form = page.form_mut().unwrap();
        form.form.set_value("password", "abcdefgh");
        form.form.set_value("confirm_password", "abcdefgh");
        form.submit(&ctx);

        let Some(AppEvent::Settled { ticket, result }) = rx.recv().await else {
            panic!("expected settlement");
        };
        page.form_mut().unwrap().settle(ticket, &result, &ctx);

        tokio::time::advance(Duration::from_millis(1000)).await;
        drop(page);

        tokio::time::advance(ctx.redirect_delay * 2).await;
        settle_tasks().await;
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_form_and_schedules_nothing() {
        let mut api = MockAuthApi::new();
        api.expect_confirm_password_reset().returning(|_, _| {
            Err(ApiError::Status {
                status: 400,
                body: "token expired".to_string(),
            })
        });
        let (ctx, mut rx) = test_context_with(api, Arc::new(RecordingNavigator::default()));

        let mut form = ResetPasswordForm::new("tok", 1);
        form.form.set_value("password", "abcdefgh");
        form.form.set_value("confirm_password", "abcdefgh");
        form.submit(&ctx);

        let Some(AppEvent::Settled { ticket, result }) = rx.recv().await else {
            panic!("expected settlement");
        };
        form.settle(ticket, &result, &ctx);

        assert_eq!(form.form.submission().phase, SubmissionPhase::Failed);
        assert_eq!(
            form.form.submission().error_message.as_deref(),
            Some(FAILURE_MESSAGE)
        );
        assert!(form.redirect().is_none());
    }
}
