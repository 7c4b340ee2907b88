//! HTTP gateway for the Lifeline coordination service.
//!
//! # Endpoints
//!
//! ## Core
//! - `GET /health` - Health check
//!
//! ## Incidents
//! - `GET /api/v1/incidents` - List incidents (creation order)
//! - `POST /api/v1/incidents` - Create an incident
//! - `PATCH /api/v1/incidents/{id}` - Partial update
//! - `POST /api/v1/incidents/{id}/resolve` - Resolve (idempotent)
//!
//! ## Responders
//! - `GET /api/v1/responders` - List responders
//! - `PATCH /api/v1/responders/{id}` - Partial update
//!
//! ## Assignments
//! - `POST /api/v1/assignments` - Bind a responder to an incident
//! - `DELETE /api/v1/assignments/{incident_id}` - Unassign
//!
//! ## Brain
//! - `POST /api/v1/brain/ask` - Ask a question; degrades to fallback answers
//!
//! ## Media relay
//! - `POST /api/v1/relay/dispatch` - Support dispatch sink (audio/transcript)
//! - `POST /api/v1/relay/emergency` - Emergency (911) sink

pub mod routes;
pub mod state;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::AppState;

/// Create the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(routes::health))
        // Incidents
        .route(
            "/api/v1/incidents",
            get(routes::list_incidents).post(routes::create_incident),
        )
        .route("/api/v1/incidents/{id}", patch(routes::update_incident))
        .route(
            "/api/v1/incidents/{id}/resolve",
            post(routes::resolve_incident),
        )
        // Responders
        .route("/api/v1/responders", get(routes::list_responders))
        .route("/api/v1/responders/{id}", patch(routes::update_responder))
        // Assignments
        .route("/api/v1/assignments", post(routes::create_assignment))
        .route(
            "/api/v1/assignments/{incident_id}",
            delete(routes::delete_assignment),
        )
        // Brain
        .route("/api/v1/brain/ask", post(routes::ask))
        // Media relay
        .route("/api/v1/relay/dispatch", post(routes::relay_dispatch))
        .route("/api/v1/relay/emergency", post(routes::relay_emergency))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the API server on the given address.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);

    info!(%addr, "Starting Lifeline API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
