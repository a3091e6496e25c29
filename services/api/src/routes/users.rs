//! User search endpoint

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::SearchQuery,
    state::AppState,
};

/// Search users by name or email, excluding the caller
pub async fn search_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let q = query.q.as_deref().unwrap_or("").trim().to_string();
    if q.chars().count() < 2 {
        return Err(ApiError::BadRequest(
            "Query must be at least 2 characters".to_string(),
        ));
    }

    let users = state.user_repository.search(&q, user.id).await.map_err(|e| {
        error!("Failed to search users: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(users))
}
