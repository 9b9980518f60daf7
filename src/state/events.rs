//! Events posted back to the UI loop by background work

use crate::api::{ApiError, SignInTokens};
use crate::state::forms::SubmitTicket;
use tokio::sync::mpsc;

/// What a successful external action returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receipt {
    Acknowledged,
    SignedIn(SignInTokens),
}

#[derive(Debug)]
pub enum AppEvent {
    /// An external action finished
    Settled {
        ticket: SubmitTicket,
        result: Result<Receipt, ApiError>,
    },
    /// Navigation requested by the page mounted as `mount_id`
    Navigate { mount_id: u64, path: String },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;
