//! Application state and core logic

use crate::api::{AuthApi, HttpAuthApi};
use crate::config::PortalConfig;
use crate::router::{Location, RemoteModule, FORGOT_PASSWORD_PATH, HOME_PATH, LOGIN_PATH};
use crate::state::events::{AppEvent, EventReceiver};
use crate::state::forms::{Form, SubmitAttempt};
use crate::state::navigation::{ChannelNavigator, Navigator};
use crate::state::pages::{Page, PageContext, ResetPasswordPage, Settlement};
use crate::state::{AppState, Session};
use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Collaborators handed to mounted pages
    ctx: PageContext,
    /// Settlements and navigations posted by background tasks
    events: EventReceiver,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from resolved configuration
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let api = HttpAuthApi::new(config.api_base_url(), config.request_timeout())
            .context("building gateway client")?;
        info!(base_url = api.base_url(), "gateway client ready");

        let location = Location::parse(config.start_route())
            .with_context(|| format!("start route {:?}", config.start_route()))?;

        Ok(Self::with_api(
            Arc::new(api),
            location,
            config.redirect_delay(),
        ))
    }

    /// Build the app around an explicit gateway implementation
    pub fn with_api(api: Arc<dyn AuthApi>, location: Location, redirect_delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let navigator: Arc<dyn Navigator> = Arc::new(ChannelNavigator::new(tx.clone()));
        let ctx = PageContext {
            api,
            navigator,
            events: tx,
            redirect_delay,
        };

        Self {
            state: AppState::new(location),
            ctx,
            events: rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Navigate to a location typed by the user or chosen by a key binding
    pub fn navigate_to(&mut self, input: &str) {
        match Location::parse(input) {
            Ok(location) => {
                self.state.status_message = None;
                self.state.navigate(location);
            }
            Err(err) => {
                warn!(error = %err, "rejected navigation");
                self.state.status_message = Some(err.to_string());
            }
        }
    }

    /// Go back to the previous non-form page
    pub fn go_back(&mut self) {
        if !self.state.go_back() {
            debug!("no history to go back to");
        }
    }

    /// Apply everything background tasks have posted since the last frame
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Settled { ticket, result } => {
                if ticket.mount_id != self.state.mount_id {
                    debug!(
                        ?ticket,
                        mounted = self.state.mount_id,
                        "discarding settlement for unmounted page"
                    );
                    return;
                }
                match self.state.page.settle(ticket, &result, &self.ctx) {
                    Settlement::SignedIn { email, tokens } => {
                        info!(%email, "signed in");
                        self.state.status_message = Some(format!("Signed in as {email}"));
                        self.state.session = Some(Session {
                            email,
                            tokens,
                            signed_in_at: Utc::now(),
                        });
                    }
                    Settlement::Applied => {}
                    Settlement::Ignored => debug!(?ticket, "stale settlement ignored"),
                }
            }
            AppEvent::Navigate { mount_id, path } => {
                if mount_id != self.state.mount_id {
                    debug!(
                        mount_id,
                        mounted = self.state.mount_id,
                        %path,
                        "discarding navigation from unmounted page"
                    );
                    return;
                }
                self.navigate_to(&path);
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Address bar is modal
        if self.state.is_route_prompt_open() {
            self.handle_route_prompt_key(key);
            return Ok(());
        }

        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state.open_route_prompt();
            return Ok(());
        }

        if self.state.page.form().is_some() {
            self.handle_form_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char(':') => self.state.open_route_prompt(),
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            _ => self.handle_page_key(key),
        }

        Ok(())
    }

    fn handle_route_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.close_route_prompt();
            }
            KeyCode::Enter => {
                if let Some(input) = self.state.close_route_prompt() {
                    self.navigate_to(&input);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.state.route_prompt.as_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.state.route_prompt.as_mut() {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Keys on a page that shows an editable form
    fn handle_form_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('f') && matches!(self.state.page, Page::Login(_)) {
            self.navigate_to(FORGOT_PASSWORD_PATH);
            return;
        }

        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.submit_current(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.state.page.form_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.state.page.form_mut() {
                    form.prev_field();
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.state.page.form_mut() {
                    form.backspace();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(form) = self.state.page.form_mut() {
                    form.input_char(c);
                }
            }
            _ => {}
        }
    }

    /// Keys on pages without an editable form
    fn handle_page_key(&mut self, key: KeyEvent) {
        match &self.state.page {
            Page::Home => match key.code {
                KeyCode::Char('l') => self.navigate_to(LOGIN_PATH),
                KeyCode::Char('f') => self.navigate_to(FORGOT_PASSWORD_PATH),
                KeyCode::Char('b') => self.open_module(RemoteModule::Blog),
                KeyCode::Char('p') => self.open_module(RemoteModule::Profile),
                KeyCode::Char('a') => self.open_module(RemoteModule::Admin),
                _ => {}
            },
            Page::ForgotPassword(_) => match key.code {
                // Another link for the same address
                KeyCode::Char('r') => self.submit_current(),
                KeyCode::Char('l') | KeyCode::Enter => self.navigate_to(LOGIN_PATH),
                _ => {}
            },
            Page::ResetPassword(ResetPasswordPage::InvalidLink) => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.navigate_to(FORGOT_PASSWORD_PATH),
                KeyCode::Char('l') => self.navigate_to(LOGIN_PATH),
                _ => {}
            },
            Page::ResetPassword(ResetPasswordPage::Form(_)) => {
                // Succeeded; skip the wait
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('l')) {
                    self.navigate_to(LOGIN_PATH);
                }
            }
            Page::Module { .. } | Page::NotFound { .. } => {
                if key.code == KeyCode::Char('h') {
                    self.navigate_to(HOME_PATH);
                }
            }
            Page::Login(_) => {}
        }
    }

    fn open_module(&mut self, module: RemoteModule) {
        self.navigate_to(&format!("/{}", module.prefix()));
    }

    fn submit_current(&mut self) {
        match self.state.page.submit(&self.ctx) {
            Some(SubmitAttempt::Invalid(errors)) => {
                debug!(count = errors.len(), "submission blocked by validation");
            }
            Some(SubmitAttempt::Suppressed) => debug!("submission already in flight"),
            Some(SubmitAttempt::Dispatched(ticket)) => debug!(?ticket, "submission dispatched"),
            None => {}
        }
    }
}
