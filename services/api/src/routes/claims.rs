//! Claim endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::{
        claim::{ClaimDecision, ClaimStatus, CreateClaimRequest, DecideClaimRequest},
        item::ItemStatus,
    },
    state::AppState,
};

/// Claim an AVAILABLE item owned by someone else
///
/// Multiple PENDING claims on one item may coexist; the owner picks one
/// later. Once a claim is accepted the item leaves AVAILABLE and further
/// claim creation fails here.
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateClaimRequest>,
) -> ApiResult<impl IntoResponse> {
    let item = state
        .item_repository
        .find_row(payload.item_id)
        .await
        .map_err(|e| {
            error!("Failed to look up item: {}", e);
            ApiError::InternalServerError
        })?;

    let item = match item {
        Some(item) if item.status == ItemStatus::Available => item,
        _ => {
            return Err(ApiError::BadRequest("Item is not available".to_string()));
        }
    };

    if item.owner_id == user.id {
        return Err(ApiError::BadRequest(
            "You cannot claim your own item".to_string(),
        ));
    }

    let claim = state
        .claim_repository
        .create(item.id, user.id)
        .await
        .map_err(|e| {
            error!("Failed to create claim: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(claim)))
}

/// Claims on items the caller owns, most recent first
pub async fn list_owner_claims(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let claims = state
        .claim_repository
        .list_for_owner(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list claims: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(claims))
}

/// Claims made by the caller, most recent first
pub async fn list_my_claims(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let claims = state
        .claim_repository
        .list_for_claimer(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list claims: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(claims))
}

/// Accept or reject a claim on an item the caller owns
pub async fn decide_claim(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(claim_id): Path<Uuid>,
    Json(payload): Json<DecideClaimRequest>,
) -> ApiResult<impl IntoResponse> {
    let decision: ClaimDecision = payload.decision.parse().map_err(ApiError::BadRequest)?;

    let claim = state
        .claim_repository
        .find_row(claim_id)
        .await
        .map_err(|e| {
            error!("Failed to look up claim: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Claim not found".to_string()))?;

    if claim.item_owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the item owner can decide this claim".to_string(),
        ));
    }

    // decided_at is set exactly once; a decided claim stays decided.
    if claim.status != ClaimStatus::Pending {
        return Err(ApiError::BadRequest("Claim already decided".to_string()));
    }

    let decided = state
        .claim_repository
        .decide(&claim, decision)
        .await
        .map_err(|e| {
            error!("Failed to decide claim: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::BadRequest("Claim already decided".to_string()))?;

    info!("Claim {} decided: {}", decided.id, decided.status);

    Ok(Json(decided))
}
