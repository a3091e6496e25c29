//! Registration, login, and the authenticated profile endpoint

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult, conflict_on_unique},
    middleware::CurrentUser,
    models::user::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    state::AppState,
    validation,
};

/// Register a new user and hand back a session token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_name(&payload.name).map_err(ApiError::BadRequest)?;
    validation::validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validation::validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    let existing = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            ApiError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let user = state
        .user_repository
        .create(payload.name.trim(), &payload.email, &payload.password)
        .await
        // Concurrent registrations can slip past the pre-check; the unique
        // index on users.email is the real arbiter.
        .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Registered user {}", user.id);

    let response = AuthResponse {
        token,
        user: user.into(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log an existing user in
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up email: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let verified = state
        .user_repository
        .verify_password(&user, &payload.password)
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !verified {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    let response = AuthResponse {
        token,
        user: user.into(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Echo the authenticated user's public fields
pub async fn me(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
    })
}
