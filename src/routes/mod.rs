pub mod api_routes;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::service::chat_service::ChatService;
use api_routes::{chat_handler, list_rooms_handler};

/// Builds the HTTP surface. `cors_origin` restricts cross-origin callers to a
/// single origin; `None` allows any.
pub fn build_router(svc: ChatService, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/rooms", get(list_rooms_handler))
        .route("/{room_id}/chat", post(chat_handler))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(svc)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring unparsable CORS origin: {e}");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
