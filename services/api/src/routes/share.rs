//! Social share stub
//!
//! Documents an extension point: the returned URL is a deterministic
//! placeholder and no external call is made.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::CurrentUser,
    models::{ShareLinkRequest, ShareLinkResponse},
    state::AppState,
};

/// Networks the stub knows how to build a link for.
const ALLOWED_NETWORKS: [&str; 2] = ["facebook", "twitter"];

fn build_share_url(network: &str, item_id: Uuid) -> String {
    format!("https://social.example/{}/share?item={}", network, item_id)
}

/// Build a placeholder share link for an allow-listed network
pub async fn share_link(
    State(_state): State<AppState>,
    Extension(_user): Extension<CurrentUser>,
    Json(payload): Json<ShareLinkRequest>,
) -> ApiResult<impl IntoResponse> {
    if !ALLOWED_NETWORKS.contains(&payload.network.as_str()) {
        return Err(ApiError::BadRequest("Unsupported network".to_string()));
    }

    let response = ShareLinkResponse {
        share_url: build_share_url(&payload.network, payload.item_id),
        note: "Sharing integration not configured; placeholder link generated".to_string(),
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_is_deterministic() {
        let id = Uuid::parse_str("4be0643f-1d98-573b-97cd-ca98a65347dd").unwrap();
        assert_eq!(
            build_share_url("twitter", id),
            "https://social.example/twitter/share?item=4be0643f-1d98-573b-97cd-ca98a65347dd"
        );
        assert_eq!(build_share_url("twitter", id), build_share_url("twitter", id));
    }

    #[test]
    fn test_allow_list_is_fixed() {
        assert!(ALLOWED_NETWORKS.contains(&"facebook"));
        assert!(ALLOWED_NETWORKS.contains(&"twitter"));
        assert!(!ALLOWED_NETWORKS.contains(&"myspace"));
    }
}
