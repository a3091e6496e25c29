//! Legacy donation models
//!
//! Donations are a standalone, unauthenticated table kept for backward
//! compatibility. They do not reference any other entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Donation entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Uuid,
    pub item: String,
    pub quantity: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Request for creating a donation entry
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonationRequest {
    pub item: String,
    pub quantity: String,
    pub location: String,
}
