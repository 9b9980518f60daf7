//! Navigation service and one-shot scheduled navigation

use crate::state::events::{AppEvent, EventSender};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Moves the shell to another location on behalf of a mounted page.
///
/// The request only takes effect while `mount_id` is still the mounted page.
pub trait Navigator: Send + Sync {
    fn go_to(&self, mount_id: u64, path: &str);
}

/// Posts navigations onto the UI loop's event channel
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    events: EventSender,
}

impl ChannelNavigator {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl Navigator for ChannelNavigator {
    fn go_to(&self, mount_id: u64, path: &str) {
        let event = AppEvent::Navigate {
            mount_id,
            path: path.to_string(),
        };
        if self.events.send(event).is_err() {
            debug!(mount_id, path, "event loop gone; dropping navigation");
        }
    }
}

/// A navigation that fires once after a delay.
///
/// Dropping the handle cancels it, so a page that owns one cannot be acted on
/// after it has been torn down.
#[derive(Debug)]
pub struct ScheduledNavigation {
    path: String,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    pub fn schedule(
        navigator: Arc<dyn Navigator>,
        mount_id: u64,
        path: &str,
        delay: Duration,
    ) -> Self {
        info!(mount_id, path, ?delay, "scheduling navigation");

        let deadline = tokio::time::Instant::now() + delay;
        let target = path.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            navigator.go_to(mount_id, &target);
        });

        Self {
            path: path.to_string(),
            delay,
            handle,
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!(path = %self.path, "cancelling scheduled navigation");
        }
        self.handle.abort();
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Records every navigation it is asked to perform
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: std::sync::Mutex<Vec<(u64, String)>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.requests().into_iter().map(|(_, path)| path).collect()
    }

    /// Navigations with the mount id that asked for them
    pub fn requests(&self) -> Vec<(u64, String)> {
        self.visited.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn go_to(&self, mount_id: u64, path: &str) {
        self.visited
            .lock()
            .unwrap()
            .push((mount_id, path.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn settle_tasks() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_at_delay_and_not_before() {
        let navigator = Arc::new(RecordingNavigator::default());
        let scheduled = ScheduledNavigation::schedule(
            navigator.clone(),
            7,
            "/auth/login",
            Duration::from_millis(3000),
        );

        tokio::time::advance(Duration::from_millis(2999)).await;
        settle_tasks().await;
        assert!(navigator.visited().is_empty());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle_tasks().await;
        assert_eq!(navigator.requests(), vec![(7, "/auth/login".to_string())]);
        assert!(scheduled.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_before_delay_cancels() {
        let navigator = Arc::new(RecordingNavigator::default());
        let scheduled = ScheduledNavigation::schedule(
            navigator.clone(),
            1,
            "/auth/login",
            Duration::from_millis(3000),
        );

        tokio::time::advance(Duration::from_millis(1500)).await;
        drop(scheduled);

        tokio::time::advance(Duration::from_millis(5000)).await;
        settle_tasks().await;
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let navigator = Arc::new(RecordingNavigator::default());
        let scheduled =
            ScheduledNavigation::schedule(navigator.clone(), 1, "/", Duration::from_millis(10));
        scheduled.cancel();
        scheduled.cancel();

        tokio::time::advance(Duration::from_millis(20)).await;
        settle_tasks().await;
        assert!(navigator.visited().is_empty());
        assert_eq!(scheduled.path(), "/");
        assert_eq!(scheduled.delay(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_channel_navigator_posts_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        ChannelNavigator::new(tx).go_to(3, "/auth/login");

        match rx.recv().await {
            Some(AppEvent::Navigate { mount_id, path }) => {
                assert_eq!(mount_id, 3);
                assert_eq!(path, "/auth/login");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_channel_navigator_tolerates_closed_loop() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelNavigator::new(tx).go_to(1, "/");
    }
}
