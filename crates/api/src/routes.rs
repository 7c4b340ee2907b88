//! HTTP route handlers for the API.

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lifeline_brain::{AnswerOrigin, ChatMessage};
use lifeline_common::{
    now_millis, Incident, IncidentPatch, LifelineError, NewIncident, Responder, ResponderPatch,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub ai_provider_configured: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        ai_provider_configured: state.brain.has_provider(),
    })
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// Error wrapper mapping the coordination taxonomy onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(pub LifelineError);

impl From<LifelineError> for ApiError {
    fn from(err: LifelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            LifelineError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            LifelineError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            LifelineError::ResponderUnavailable(_) => {
                (StatusCode::CONFLICT, "RESPONDER_UNAVAILABLE")
            }
            LifelineError::ProviderUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "PROVIDER_UNAVAILABLE")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorBody {
            error: self.0.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Incidents
// ---------------------------------------------------------------------------

pub async fn list_incidents(State(state): State<Arc<AppState>>) -> Json<Vec<Incident>> {
    Json(state.dispatcher.list_incidents().await)
}

pub async fn create_incident(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewIncident>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
    let incident = state.dispatcher.create_incident(new).await?;
    Ok((StatusCode::CREATED, Json(incident)))
}

pub async fn update_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<IncidentPatch>,
) -> Result<Json<Incident>, ApiError> {
    let incident = state.dispatcher.update_incident(&id, patch).await?;
    Ok(Json(incident))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub resolved_by: Option<String>,
}

pub async fn resolve_incident(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ResolveRequest>,
) -> Result<Json<Incident>, ApiError> {
    let incident = state.dispatcher.resolve(&id, body.resolved_by).await?;
    Ok(Json(incident))
}

// ---------------------------------------------------------------------------
// Responders
// ---------------------------------------------------------------------------

pub async fn list_responders(State(state): State<Arc<AppState>>) -> Json<Vec<Responder>> {
    Json(state.dispatcher.list_responders().await)
}

pub async fn update_responder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ResponderPatch>,
) -> Result<Json<Responder>, ApiError> {
    let responder = state.dispatcher.update_responder(&id, patch).await?;
    Ok(Json(responder))
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub incident_id: String,
    pub responder_id: String,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub incident: Incident,
    pub responder: Option<Responder>,
}

pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssignmentRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let (incident, responder) = state
        .dispatcher
        .assign(&request.incident_id, &request.responder_id)
        .await?;
    Ok(Json(AssignmentResponse {
        incident,
        responder: Some(responder),
    }))
}

pub async fn delete_assignment(
    State(state): State<Arc<AppState>>,
    Path(incident_id): Path<String>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let (incident, responder) = state.dispatcher.unassign(&incident_id).await?;
    Ok(Json(AssignmentResponse {
        incident,
        responder,
    }))
}

// ---------------------------------------------------------------------------
// Brain
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
    pub source: AnswerOrigin,
}

/// Ask the brain a question. Provider failures never surface here — the
/// response degrades to the fallback table with `source: "fallback"`.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answer = state.brain.ask(&request.question, &request.history).await?;
    Ok(Json(AskResponse {
        response: answer.text,
        source: answer.origin,
    }))
}

// ---------------------------------------------------------------------------
// Media relay
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RelayAck {
    pub success: bool,
    pub received: u64,
}

/// Transcript marker body, if the relay payload is JSON.
#[derive(Debug, Deserialize)]
struct TranscriptMarker {
    #[serde(rename = "type")]
    kind: String,
}

fn relay_ack(channel: &'static str, body: &axum::body::Bytes) -> RelayAck {
    let timestamp = now_millis();

    let is_transcript = serde_json::from_slice::<TranscriptMarker>(body)
        .map(|marker| marker.kind == "transcript")
        .unwrap_or(false);

    if is_transcript {
        // Transcript content is never logged.
        info!(channel, timestamp, "Transcript received (content redacted for privacy)");
    } else {
        info!(channel, timestamp, size_bytes = body.len(), "Audio received");
    }

    RelayAck {
        success: true,
        received: timestamp,
    }
}

/// Best-effort relay to the support dispatch sink.
pub async fn relay_dispatch(body: axum::body::Bytes) -> Json<RelayAck> {
    Json(relay_ack("support_dispatch", &body))
}

/// Best-effort relay to the emergency (911) sink.
pub async fn relay_emergency(body: axum::body::Bytes) -> Json<RelayAck> {
    Json(relay_ack("emergency_relay", &body))
}
