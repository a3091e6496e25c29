//! Food item endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::item::{CreateItemRequest, ExpiringQuery, ItemStatus, UpdateItemStatusRequest},
    state::AppState,
};

/// Create an item in the caller's fridge
pub async fn create_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    if let Some(category_id) = payload.category_id {
        let known = state
            .category_repository
            .exists(category_id)
            .await
            .map_err(|e| {
                error!("Failed to check category: {}", e);
                ApiError::InternalServerError
            })?;
        if !known {
            return Err(ApiError::BadRequest("Unknown category".to_string()));
        }
    }

    let item = state
        .item_repository
        .create(user.id, title, payload.category_id, payload.expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create item: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List the caller's items, most recent first
pub async fn list_items(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let items = state
        .item_repository
        .list_for_owner(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list items: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(items))
}

/// Update an item's status, ownership-scoped
pub async fn update_item_status(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let status: ItemStatus = payload.status.parse().map_err(ApiError::BadRequest)?;

    let item = state
        .item_repository
        .update_status(item_id, user.id, status)
        .await
        .map_err(|e| {
            error!("Failed to update item status: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))?;

    Ok(Json(item))
}

/// List the caller's items expiring within `days` (default 3)
pub async fn list_expiring(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ExpiringQuery>,
) -> ApiResult<impl IntoResponse> {
    let days = query.days.unwrap_or(3);

    let items = state
        .item_repository
        .list_expiring(user.id, days)
        .await
        .map_err(|e| {
            error!("Failed to list expiring items: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(items))
}

/// The claim pool: AVAILABLE items not owned by the caller
pub async fn list_available(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let items = state
        .item_repository
        .list_available(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list available items: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(items))
}
