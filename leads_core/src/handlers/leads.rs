//! Lead submission handlers

use crate::{
    error::Result,
    extractors::ApiJson,
    models::{ApiResponse, LeadRequest},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_submit_lead(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LeadRequest>,
) -> Result<impl IntoResponse> {
    info!("POST /api/leads - role: {:?}, source: {:?}", request.role.as_str(), request.source.as_str());

    let accepted = state.lead_service.submit_lead(request).await?;

    Ok(Json(ApiResponse::success(accepted)))
}

pub async fn handle_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(state.lead_service.metrics().snapshot()))
}
