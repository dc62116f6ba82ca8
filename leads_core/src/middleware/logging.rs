//! Request tracing layer and log-safe helpers for lead data

use crate::models::Role;
use axum::body::Body;
use http::{header, Request, Response, StatusCode};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, TraceLayer};
use tracing::{debug, error, info, info_span, warn, Span};
use uuid::Uuid;

/// Request tracing for the gateway. Callbacks are plain `fn`s so the layer type can be named.
pub type GatewayTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    fn(&Request<Body>, &Span),
    fn(&Response<Body>, Duration, &Span),
    DefaultOnBodyChunk,
    DefaultOnEos,
    fn(ServerErrorsFailureClass, Duration, &Span),
>;

pub fn logging_layer() -> GatewayTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(gateway_span as fn(&Request<Body>) -> Span)
        .on_request(log_request as fn(&Request<Body>, &Span))
        .on_response(log_response as fn(&Response<Body>, Duration, &Span))
        .on_failure(log_failure as fn(ServerErrorsFailureClass, Duration, &Span))
}

fn gateway_span(request: &Request<Body>) -> Span {
    info_span!(
        "gateway_request",
        method = %request.method(),
        path = %request.uri().path(),
        origin = request
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-"),
    )
}

fn log_request(request: &Request<Body>, _span: &Span) {
    debug!("{} {} received", request.method(), request.uri().path());
}

// 409 and 422 are normal lead outcomes, 502 means the CRM let us down.
fn log_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;

    match status {
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            info!(status = status.as_u16(), latency_ms, "lead not accepted")
        }
        StatusCode::BAD_GATEWAY => {
            warn!(status = status.as_u16(), latency_ms, "CRM unavailable for this lead")
        }
        s if s.is_server_error() => error!(status = s.as_u16(), latency_ms, "gateway error"),
        s if s.is_client_error() => warn!(status = s.as_u16(), latency_ms, "request rejected"),
        s => info!(status = s.as_u16(), latency_ms, "request handled"),
    }
}

fn log_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    error!(latency_ms = latency.as_millis() as u64, failure = ?failure, "request failed");
}

/// Span wrapping one submit attempt, so CRM logs can be tied back to it.
pub fn submission_span(submission_id: Uuid, role: Role) -> Span {
    info_span!(
        "lead_submission",
        submission_id = %submission_id,
        role = %role,
    )
}

/// `asha.rao@example.com` -> `a***@example.com`
pub fn redact_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Keeps the last four digits.
pub fn redact_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().collect();
    if digits.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("******{}", tail)
}
