//! Single-page application delivery
//!
//! Non-API routes fall back to the built frontend's entry document so
//! client-side routing keeps working. If the bundle is absent the fallback
//! answers with a JSON notice instead of a broken page.

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use serde_json::json;

use crate::state::AppState;

/// Serve the SPA entry document, or a JSON notice when no bundle is built
pub async fn spa_fallback(State(state): State<AppState>) -> impl IntoResponse {
    let index = state.static_dir.join("index.html");

    match tokio::fs::read_to_string(&index).await {
        Ok(contents) => Html(contents).into_response(),
        Err(_) => Json(json!({
            "message": "Frontend bundle not found; API is available under /api"
        }))
        .into_response(),
    }
}
