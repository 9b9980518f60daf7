//! Application state definitions

use crate::api::SignInTokens;
use crate::router::Location;
use crate::state::pages::Page;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// The signed-in user, if any
#[derive(Debug, Clone)]
pub struct Session {
    pub email: String,
    pub tokens: SignInTokens,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    /// When the access token stops being accepted
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.signed_in_at + Duration::seconds(self.tokens.expires_in)
    }
}

/// Shell state: where we are and what is mounted there
#[derive(Debug)]
pub struct AppState {
    pub location: Location,
    pub page: Page,
    /// Id of the currently mounted page
    pub mount_id: u64,
    next_mount_id: u64,
    /// Previously visited locations, most recent last
    pub history: Vec<Location>,
    /// Address bar input while it is open
    pub route_prompt: Option<String>,
    pub session: Option<Session>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(location: Location) -> Self {
        let page = Page::mount(&location, 1);
        Self {
            location,
            page,
            mount_id: 1,
            next_mount_id: 2,
            history: Vec::new(),
            route_prompt: None,
            session: None,
            status_message: None,
        }
    }

    /// Unmount the current page and mount `location`
    pub fn navigate(&mut self, location: Location) {
        let previous = std::mem::replace(&mut self.location, location);
        self.history.push(previous);
        self.mount_current();
    }

    /// Go back to the last location that is not a form page
    pub fn go_back(&mut self) -> bool {
        while let Some(location) = self.history.pop() {
            if location.route.is_form() {
                continue;
            }
            self.location = location;
            self.mount_current();
            return true;
        }
        false
    }

    fn mount_current(&mut self) {
        let mount_id = self.next_mount_id;
        self.next_mount_id += 1;
        debug!(
            unmounted = self.mount_id,
            mounted = mount_id,
            location = %self.location,
            "remounting page"
        );
        // Assigning drops the previous page along with its timers
        self.page = Page::mount(&self.location, mount_id);
        self.mount_id = mount_id;
    }

    pub fn open_route_prompt(&mut self) {
        self.route_prompt = Some(self.location.href().to_string());
    }

    pub fn close_route_prompt(&mut self) -> Option<String> {
        self.route_prompt.take()
    }

    pub fn is_route_prompt_open(&self) -> bool {
        self.route_prompt.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Location::home())
    }
}
