//! HTTP surface: the description relay endpoint and the single-page UI.
//!
//! The relay is stateless per request; everything it needs (the vision
//! client built from process configuration) is injected through
//! [`AppState`] at router construction.

use crate::ai::VisionService;
use crate::models::{AltTextRequest, AltTextResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Returned to the client whenever the provider call fails; the underlying
/// provider error is logged, never leaked.
pub const PROCESSING_FAILED_MESSAGE: &str = "Image processing failed.";

/// Substituted when the provider replies without usable text.
pub const NO_DESCRIPTION_FALLBACK: &str = "No description generated";

/// Shared handler state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<dyn VisionService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/imgalt", post(generate_alt_text))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

/// `POST /api/imgalt`: forward one image source to the vision provider.
async fn generate_alt_text(
    State(state): State<AppState>,
    Json(request): Json<AltTextRequest>,
) -> Result<Json<AltTextResponse>, ApiError> {
    if request.image_source.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing image data.".to_string()));
    }

    let alt = state
        .vision
        .describe_image(&request.image_source)
        .await
        .map_err(|e| {
            error!("Vision provider error: {}", e);
            ApiError::Internal(PROCESSING_FAILED_MESSAGE.to_string())
        })?
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION_FALLBACK.to_string());

    Ok(Json(AltTextResponse { alt }))
}

/// HTTP-facing error mapped to a JSON `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
