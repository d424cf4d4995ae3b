use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::ChatQuery;
use crate::service::chat_service::ChatService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/{roomId}/chat?userPrompt=...` — plays one turn, answers with plain text
pub async fn chat_handler(
    Path(room_id): Path<i64>,
    Query(query): Query<ChatQuery>,
    State(svc): State<ChatService>,
) -> Response {
    info!(room_id, "Chat turn requested");
    match svc.chat(room_id, &query.user_prompt).await {
        Ok(answer) => answer.into_response(),
        Err(err) => error_response(&err),
    }
}

/// GET `/rooms` — rooms with a round in progress, as JSON
pub async fn list_rooms_handler(State(svc): State<ChatService>) -> impl IntoResponse {
    Json(svc.list_rooms().await)
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_agent_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if status.is_server_error() {
        error!("Chat turn failed: {err}");
    }
    (status, err.to_string()).into_response()
}
