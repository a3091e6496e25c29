//! Legacy donation endpoints
//!
//! Unauthenticated and unrelated to the rest of the model; kept for
//! backward compatibility.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    models::donation::CreateDonationRequest,
    state::AppState,
};

/// List all donation entries, most recent first
pub async fn list_donations(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let donations = state.donation_repository.list().await.map_err(|e| {
        error!("Failed to list donations: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(donations))
}

/// Record a donation entry
pub async fn create_donation(
    State(state): State<AppState>,
    Json(payload): Json<CreateDonationRequest>,
) -> ApiResult<impl IntoResponse> {
    let donation = state
        .donation_repository
        .create(&payload.item, &payload.quantity, &payload.location)
        .await
        .map_err(|e| {
            error!("Failed to create donation: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(donation)))
}
