//! Login page

use super::forgot_password::email_rules;
use super::{PageContext, Settlement};
use crate::api::ApiError;
use crate::router::HOME_PATH;
use crate::state::events::Receipt;
use crate::state::forms::{
    dispatch, FieldRules, FieldValidationRule, FormField, FormModel, SubmissionLifecycle,
    SubmitAttempt, SubmitTicket,
};
use tracing::info;

pub const FAILURE_MESSAGE: &str = "Failed to sign in. Please check your credentials and try again.";

#[derive(Debug, Clone)]
pub struct LoginPage {
    pub form: FormModel,
}

impl LoginPage {
    pub fn new(mount_id: u64) -> Self {
        let form = FormModel::new(
            vec![
                FormField::text("email", "Email address"),
                FormField::secret("password", "Password"),
            ],
            FieldRules::new()
                .field("email", email_rules())
                .field(
                    "password",
                    vec![FieldValidationRule::required("Password is required")],
                ),
            SubmissionLifecycle::new(mount_id, FAILURE_MESSAGE),
        );
        Self { form }
    }

    pub fn submit(&mut self, ctx: &PageContext) -> SubmitAttempt {
        let attempt = self.form.begin_submit();
        if let SubmitAttempt::Dispatched(ticket) = attempt {
            let email = self.form.value("email").to_string();
            let password = self.form.value("password").to_string();
            info!(?ticket, "signing in");

            let api = ctx.api.clone();
            dispatch(ticket, ctx.events.clone(), async move {
                api.sign_in(&email, &password).await.map(Receipt::SignedIn)
            });
        }
        attempt
    }

    /// On success the shell goes home right away. A failure clears the password.
    pub fn settle(
        &mut self,
        ticket: SubmitTicket,
        result: &Result<Receipt, ApiError>,
        ctx: &PageContext,
    ) -> Settlement {
        if !self.form.settle(ticket, result.as_ref().map(|_| ())) {
            return Settlement::Ignored;
        }

        match result {
            Ok(Receipt::SignedIn(tokens)) => {
                let email = self.form.value("email").to_string();
                ctx.navigator.go_to(ticket.mount_id, HOME_PATH);
                Settlement::SignedIn {
                    email,
                    tokens: tokens.clone(),
                }
            }
            Ok(_) => Settlement::Applied,
            Err(_) => {
                self.form.clear_field("password");
                Settlement::Applied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockAuthApi, SignInTokens};
    use crate::state::events::AppEvent;
    use crate::state::forms::SubmissionPhase;
    use crate::state::navigation::RecordingNavigator;
    use crate::state::pages::test_context_with;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn tokens() -> SignInTokens {
        SignInTokens {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in: 900,
        }
    }

    #[tokio::test]
    async fn test_missing_password_is_reported() {
        let mut api = MockAuthApi::new();
        api.expect_sign_in().times(0);
        let (ctx, _rx) = test_context_with(api, Arc::new(RecordingNavigator::default()));

        let mut page = LoginPage::new(1);
        page.form.set_value("email", "user@example.com");
        let SubmitAttempt::Invalid(errors) = page.submit(&ctx) else {
            panic!("expected Invalid");
        };
        assert_eq!(errors.message_for("password"), Some("Password is required"));
        assert_eq!(errors.message_for("email"), None);
    }

    #[tokio::test]
    async fn test_success_signs_in_and_goes_home() {
        let mut api = MockAuthApi::new();
        api.expect_sign_in()
            .withf(|email, password| email == "user@example.com" && password == "hunter22")
            .times(1)
            .returning(|_, _| Ok(tokens()));
        let navigator = Arc::new(RecordingNavigator::default());
        let (ctx, mut rx) = test_context_with(api, navigator.clone());

        let mut page = LoginPage::new(1);
        page.form.set_value("email", "user@example.com");
        page.form.set_value("password", "hunter22");
        assert!(page.submit(&ctx).is_dispatched());

        let Some(AppEvent::Settled { ticket, result }) = rx.recv().await else {
            panic!("expected settlement");
        };
        let settlement = page.settle(ticket, &result, &ctx);

        assert_eq!(
            settlement,
            Settlement::SignedIn {
                email: "user@example.com".to_string(),
                tokens: tokens(),
            }
        );
        assert_eq!(navigator.requests(), vec![(1, HOME_PATH.to_string())]);
    }

    #[tokio::test]
    async fn test_rejected_credentials_show_static_message() {
        let mut api = MockAuthApi::new();
        api.expect_sign_in().returning(|_, _| {
            Err(ApiError::Status {
                status: 401,
                body: "invalid credentials".to_string(),
            })
        });
        let navigator = Arc::new(RecordingNavigator::default());
        let (ctx, mut rx) = test_context_with(api, navigator.clone());

        let mut page = LoginPage::new(1);
        page.form.set_value("email", "user@example.com");
        page.form.set_value("password", "wrong");
        page.submit(&ctx);

        let Some(AppEvent::Settled { ticket, result }) = rx.recv().await else {
            panic!("expected settlement");
        };
        assert_eq!(page.settle(ticket, &result, &ctx), Settlement::Applied);
        assert_eq!(page.form.submission().phase, SubmissionPhase::Failed);
        assert_eq!(
            page.form.submission().error_message.as_deref(),
            Some(FAILURE_MESSAGE)
        );
        assert!(navigator.visited().is_empty());

        // Email is kept for the retry, the password is not
        assert_eq!(page.form.value("email"), "user@example.com");
        assert_eq!(page.form.value("password"), "");
        assert_eq!(page.form.error_for("password"), None);
    }
}
