//! Mounted pages
//!
//! A page is built from a [`Location`] when the shell navigates to it and is
//! dropped when the shell navigates away. Everything a page owns (form state,
//! scheduled redirects) goes with it.

mod forgot_password;
mod login;
mod reset_password;

pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use reset_password::{ResetPasswordForm, ResetPasswordPage};

use crate::api::{ApiError, AuthApi, SignInTokens};
use crate::router::{AuthRoute, Location, RemoteModule, Route};
use crate::state::events::{EventSender, Receipt};
use crate::state::forms::{FormModel, SubmitAttempt, SubmitTicket};
use crate::state::navigation::Navigator;
use std::sync::Arc;
use std::time::Duration;

/// Collaborators handed to pages explicitly
#[derive(Clone)]
pub struct PageContext {
    pub api: Arc<dyn AuthApi>,
    pub navigator: Arc<dyn Navigator>,
    pub events: EventSender,
    /// Delay before the post-reset redirect to login
    pub redirect_delay: Duration,
}

/// What applying a settlement did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The ticket was not outstanding on this page
    Ignored,
    Applied,
    SignedIn { email: String, tokens: SignInTokens },
}

#[derive(Debug)]
pub enum Page {
    Home,
    Login(LoginPage),
    ForgotPassword(ForgotPasswordPage),
    ResetPassword(ResetPasswordPage),
    Module {
        module: RemoteModule,
        subpath: String,
    },
    NotFound {
        path: String,
    },
}

impl Page {
    pub fn mount(location: &Location, mount_id: u64) -> Self {
        match &location.route {
            Route::Home => Page::Home,
            Route::Auth(AuthRoute::Login) => Page::Login(LoginPage::new(mount_id)),
            Route::Auth(AuthRoute::ForgotPassword) => {
                Page::ForgotPassword(ForgotPasswordPage::new(mount_id))
            }
            Route::Auth(AuthRoute::ResetPassword) => {
                Page::ResetPassword(ResetPasswordPage::mount(&location.query, mount_id))
            }
            Route::Module { module, subpath } => Page::Module {
                module: *module,
                subpath: subpath.clone(),
            },
            Route::NotFound => Page::NotFound {
                path: location.href().to_string(),
            },
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::Home => "Home".to_string(),
            Page::Login(_) => "Sign in".to_string(),
            Page::ForgotPassword(page) if page.link_sent() => "Check your email".to_string(),
            Page::ForgotPassword(_) => "Reset your password".to_string(),
            Page::ResetPassword(ResetPasswordPage::InvalidLink) => "Invalid Reset Link".to_string(),
            Page::ResetPassword(ResetPasswordPage::Form(form)) if form.succeeded() => {
                "Password Reset Successful".to_string()
            }
            Page::ResetPassword(_) => "Create new password".to_string(),
            Page::Module { module, .. } => module.title().to_string(),
            Page::NotFound { .. } => "Not Found".to_string(),
        }
    }

    /// The editable form currently shown, if any
    pub fn form(&self) -> Option<&FormModel> {
        match self {
            Page::Login(page) => Some(&page.form),
            Page::ForgotPassword(page) if !page.link_sent() => Some(&page.form),
            Page::ResetPassword(ResetPasswordPage::Form(form)) if !form.succeeded() => {
                Some(&form.form)
            }
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormModel> {
        match self {
            Page::Login(page) => Some(&mut page.form),
            Page::ForgotPassword(page) if !page.link_sent() => Some(&mut page.form),
            Page::ResetPassword(ResetPasswordPage::Form(form)) if !form.succeeded() => {
                Some(&mut form.form)
            }
            _ => None,
        }
    }

    /// Submit the page's form. `None` when the page has nothing to submit.
    pub fn submit(&mut self, ctx: &PageContext) -> Option<SubmitAttempt> {
        match self {
            Page::Login(page) => Some(page.submit(ctx)),
            Page::ForgotPassword(page) => Some(page.submit(ctx)),
            Page::ResetPassword(ResetPasswordPage::Form(form)) => Some(form.submit(ctx)),
            _ => None,
        }
    }

    pub fn settle(
        &mut self,
        ticket: SubmitTicket,
        result: &Result<Receipt, ApiError>,
        ctx: &PageContext,
    ) -> Settlement {
        match self {
            Page::Login(page) => page.settle(ticket, result, ctx),
            Page::ForgotPassword(page) => page.settle(ticket, result),
            Page::ResetPassword(ResetPasswordPage::Form(form)) => form.settle(ticket, result, ctx),
            _ => Settlement::Ignored,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_context_with(
    api: crate::api::MockAuthApi,
    navigator: Arc<dyn Navigator>,
) -> (PageContext, crate::state::events::EventReceiver) {
    let (events, rx) = tokio::sync::mpsc::unbounded_channel();
    let ctx = PageContext {
        api: Arc::new(api),
        navigator,
        events,
        redirect_delay: Duration::from_millis(3000),
    };
    (ctx, rx)
}

#[cfg(test)]
pub(crate) fn test_context(
    api: crate::api::MockAuthApi,
) -> (PageContext, crate::state::events::EventReceiver) {
    test_context_with(
        api,
        Arc::new(crate::state::navigation::RecordingNavigator::default()),
    )
}
