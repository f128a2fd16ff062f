//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse, SuccessResponse, SymptomsResponse};
use super::AppState;
use crate::runtime::TurnError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};

const MAX_SESSION_ID_LEN: usize = 128;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversational turns
        .route("/api/chat", post(chat))
        .route("/api/sessions/:id", delete(end_session))
        // Vocabulary
        .route("/api/symptoms", get(list_symptoms))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Turns
// ============================================================

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = match req.session_id {
        Some(id) => validate_session_id(id)?,
        None => uuid::Uuid::new_v4().to_string(),
    };

    let turn = state.runtime.handle_turn(&session_id, &req.message)?;

    Ok(Json(ChatResponse {
        session_id,
        reply: turn.reply,
        phase: turn.phase,
    }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let id = validate_session_id(id)?;
    state.runtime.end_session(&id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Ids are taken as-is; surrounding whitespace is rejected rather than trimmed
/// so that distinct ids never share a session.
fn validate_session_id(id: String) -> Result<String, AppError> {
    if id.is_empty() {
        return Err(AppError::BadRequest("session_id must not be empty".to_string()));
    }
    if id.trim() != id {
        return Err(AppError::BadRequest(
            "session_id must not have leading or trailing whitespace".to_string(),
        ));
    }
    if id.len() > MAX_SESSION_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "session_id must be at most {MAX_SESSION_ID_LEN} bytes"
        )));
    }
    Ok(id)
}

// ============================================================
// Vocabulary
// ============================================================

async fn list_symptoms(State(state): State<AppState>) -> Json<SymptomsResponse> {
    let symptoms = state
        .runtime
        .engine()
        .vocabulary()
        .tokens()
        .iter()
        .map(|t| (*t).to_string())
        .collect();
    Json(SymptomsResponse { symptoms })
}

async fn get_version() -> &'static str {
    concat!("symptom-triage ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

const INTERNAL_ERROR: &str = "internal error";

// Store and model details stay in the log, not in the response.
impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        tracing::error!(error = %err, "Turn failed");
        AppError::Internal(INTERNAL_ERROR.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
