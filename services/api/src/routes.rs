//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, patch, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod categories;
pub mod claims;
pub mod donations;
pub mod groups;
pub mod items;
pub mod share;
pub mod spa;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/me", get(auth::me))
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/expiring", get(items::list_expiring))
        .route("/items/available", get(items::list_available))
        .route("/items/:id/status", patch(items::update_item_status))
        .route("/users/search", get(users::search_users))
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route("/groups/:id", get(groups::get_group))
        .route("/groups/:id/members", post(groups::add_member))
        .route("/groups/:id/items", get(groups::list_group_items))
        .route("/groups/:id/share", post(groups::share_item))
        .route(
            "/groups/:id/messages",
            get(groups::list_messages).post(groups::post_message),
        )
        .route("/claims", post(claims::create_claim))
        .route("/claims/for-owner", get(claims::list_owner_claims))
        .route("/claims/mine", get(claims::list_my_claims))
        .route("/claims/:id/decision", post(claims::decide_claim))
        .route("/share", post(share::share_link))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/categories", get(categories::list_categories))
        .route(
            "/donations",
            get(donations::list_donations).post(donations::create_donation),
        )
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .nest_service("/assets", ServeDir::new(state.static_dir.join("assets")))
        .fallback(spa::spa_fallback)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "fridge-share-api"
    }))
}
