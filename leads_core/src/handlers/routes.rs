//! Route table for the lead gateway

use super::{health, leads};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::handle_root))
        .route("/health", get(health::handle_health))
        .route("/api/stats", get(leads::handle_stats))
        .route("/api/leads", post(leads::handle_submit_lead))
}
