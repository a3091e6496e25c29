//! Authentication middleware for bearer token validation

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// The authenticated user attached to every protected request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Extract and validate the bearer token, then re-resolve the user
///
/// The user id carried by the token is looked up in the store on every
/// request, so a deleted user's token stops working immediately.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization header".to_string()))?;

    // Validate the token signature and expiry
    let claims = state
        .jwt_service
        .validate_token(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    // Resolve the encoded user id against the store
    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await
        .map_err(|e| {
            error!("Failed to resolve user from token: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    let current_user = CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
        created_at: user.created_at,
    };

    // Insert the user into the request extensions for handlers
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}
