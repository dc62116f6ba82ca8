//! Lead capture for the Actify website: contact-form validation, CRM payload shaping,
//! submission and outcome handling, plus an HTTP gateway exposing the pipeline.

pub mod config;
pub mod crm;
pub mod error;
pub mod extractors;
pub mod form;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use crate::config::AppConfig;
pub use crm::{CrmClient, CrmError, LeadSubmitter, SubmissionOutcome};
pub use error::{AppError, Result};
pub use form::{LeadForm, Navigator, Notifier, OutcomeDispatcher, Route, ScheduledNavigation, SubmitResult};
pub use handlers::routes::create_routes;
pub use metrics::{SubmissionMetrics, SubmissionStats};
pub use middleware::cors::{cors_layer_from_config, cors_layer_permissive};
pub use models::{FormField, LeadFormInput, LeadRequest, LeadSource, LeadSubmissionPayload, Role, ValidatedLead};
pub use services::LeadService;
pub use validation::{ContextValidatable, Validatable, ValidationContext, ValidationResult};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub crm_endpoint: String,
    pub lead_service: LeadService,
}

impl AppState {
    pub fn new(submitter: Arc<dyn LeadSubmitter>, config: &AppConfig) -> Self {
        Self {
            app_name: "Actify Lead Gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            crm_endpoint: config.crm.contact_url(),
            lead_service: LeadService::new(submitter, SubmissionMetrics::new(), &config.form),
        }
    }

    /// Wires the real CRM client. The configuration is re-checked since callers may have
    /// built it by hand.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;

        let client = CrmClient::new(&config.crm)
            .map_err(|e| AppError::Config(e.to_string()))?;
        info!("CRM client targeting {}", client.contact_url());

        Ok(Self::new(Arc::new(client), config))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
