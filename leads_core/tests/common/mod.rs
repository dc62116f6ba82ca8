#![allow(dead_code)]

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use leads_core::{
    config::CrmConfig, LeadFormInput, LeadSubmissionPayload, LeadSubmitter, Navigator, Notifier,
    Route, SubmissionOutcome,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

pub const CONTACT_PATH: &str = "/Crm/Portal/User/websitecontacts";

pub fn valid_form() -> LeadFormInput {
    LeadFormInput {
        first_name: "Priya".to_string(),
        last_name: "Sharma".to_string(),
        email: "priya.sharma@example.com".to_string(),
        phone_number: "9820012345".to_string(),
        remark: "Looking for the full stack course".to_string(),
        account_name: String::new(),
        date: "2024-06-20".to_string(),
        time: "14:45".to_string(),
    }
}

#[derive(Clone)]
struct FakeCrmState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Stand-in for the CRM's website-contacts endpoint on an ephemeral local port.
pub struct FakeCrm {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl FakeCrm {
    pub async fn spawn(status: StatusCode, body: &'static str) -> Self {
        Self::spawn_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn spawn_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeCrmState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route(&format!("/crm-uat{}", CONTACT_PATH), post(handle_contact))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn crm_config(&self, timeout_seconds: u64) -> CrmConfig {
        CrmConfig {
            base_url: format!("http://{}/crm-uat", self.addr),
            contact_path: CONTACT_PATH.to_string(),
            request_timeout_seconds: timeout_seconds,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Drop for FakeCrm {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_contact(State(state): State<FakeCrmState>, Json(body): Json<Value>) -> (StatusCode, &'static str) {
    state.requests.lock().push(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body)
}

/// Submitter that answers with a fixed outcome, optionally holding each call until released.
pub struct ScriptedSubmitter {
    outcome: SubmissionOutcome,
    calls: AtomicUsize,
    pub payloads: Mutex<Vec<LeadSubmissionPayload>>,
    gate: Option<Arc<Notify>>,
    pub entered: Arc<Notify>,
}

impl ScriptedSubmitter {
    pub fn new(outcome: SubmissionOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            gate: None,
            entered: Arc::new(Notify::new()),
        })
    }

    pub fn gated(outcome: SubmissionOutcome, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
            gate: Some(gate),
            entered: Arc::new(Notify::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadSubmitter for ScriptedSubmitter {
    async fn submit(&self, payload: &LeadSubmissionPayload) -> SubmissionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().push(payload.clone());
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

/// Records toasts and redirects in place of the browser.
#[derive(Default)]
pub struct RecordingView {
    pub toasts: Mutex<Vec<Toast>>,
    pub visited: Mutex<Vec<Route>>,
}

impl RecordingView {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().clone()
    }
}

impl Notifier for RecordingView {
    fn notify_success(&self, message: &str) {
        self.toasts.lock().push(Toast::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.toasts.lock().push(Toast::Error(message.to_string()));
    }
}

impl Navigator for RecordingView {
    fn navigate(&self, route: Route) {
        self.visited.lock().push(route);
    }
}
