use super::dispatch::{Navigator, Route};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// A redirect waiting out its grace period. Dropping it cancels the redirect.
#[derive(Debug)]
pub struct ScheduledNavigation {
    route: Route,
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    /// Must be called from within a tokio runtime.
    pub fn schedule(navigator: &Arc<dyn Navigator>, route: Route, delay: Duration) -> Self {
        let navigator: Weak<dyn Navigator> = Arc::downgrade(navigator);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match navigator.upgrade() {
                Some(navigator) => navigator.navigate(route),
                None => debug!(path = route.path(), "View gone before redirect, skipping"),
            }
        });

        Self { route, handle }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(path = self.route.path(), "Cancelling pending redirect");
            self.handle.abort();
        }
    }
}
