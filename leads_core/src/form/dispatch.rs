//! Turns a classified submission outcome into what the visitor sees

use super::navigation::ScheduledNavigation;
use crate::crm::SubmissionOutcome;
use crate::models::Role;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub const SUCCESS_MESSAGE: &str = "Thank you for sharing the details";

/// Toast surface. Injected so the pipeline never reaches for a global.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Business,
    Learning,
    Careers,
}

impl Route {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::BusinessOwner => Route::Business,
            Role::Student => Route::Learning,
            Role::JobSeeker | Role::Unset => Route::Careers,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Business => "/business",
            Route::Learning => "/learning",
            Route::Careers => "/careers",
        }
    }
}

#[derive(Clone)]
pub struct OutcomeDispatcher {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
}

impl OutcomeDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>, redirect_delay: Duration) -> Self {
        Self {
            notifier,
            navigator,
            redirect_delay,
        }
    }

    /// Notifies right away. On success the redirect is handed back still pending so
    /// the caller owns its lifetime.
    pub fn dispatch(&self, outcome: &SubmissionOutcome, role: Role) -> Option<ScheduledNavigation> {
        match outcome {
            SubmissionOutcome::Success { .. } => {
                self.notifier.notify_success(SUCCESS_MESSAGE);
                let route = Route::for_role(role);
                info!(path = route.path(), delay_ms = self.redirect_delay.as_millis() as u64, "Scheduling redirect");
                Some(ScheduledNavigation::schedule(&self.navigator, route, self.redirect_delay))
            }
            SubmissionOutcome::Duplicate { message } | SubmissionOutcome::Failure { message } => {
                self.notifier.notify_error(message);
                None
            }
        }
    }
}
