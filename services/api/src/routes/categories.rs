//! Category listing endpoint

use axum::{Json, extract::State, response::IntoResponse};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// List all categories alphabetically, seeding the defaults on first use
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.category_repository.list().await.map_err(|e| {
        error!("Failed to list categories: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(categories))
}
