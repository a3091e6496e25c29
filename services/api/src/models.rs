//! API models for request and response payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod claim;
pub mod donation;
pub mod group;
pub mod item;
pub mod user;

/// Query parameters for user search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Request for the social share stub
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkRequest {
    pub item_id: Uuid,
    pub network: String,
}

/// Response for the social share stub
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    pub share_url: String,
    pub note: String,
}
