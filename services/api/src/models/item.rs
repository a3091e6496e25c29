//! Food item and category models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::user::UserResponse;

/// Lifecycle status of a food item
///
/// Transitions are IN_FRIDGE -> AVAILABLE (owner releases the item) and
/// AVAILABLE -> CLAIMED (owner accepts a claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    InFridge,
    Available,
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::InFridge => "IN_FRIDGE",
            ItemStatus::Available => "AVAILABLE",
            ItemStatus::Claimed => "CLAIMED",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_FRIDGE" => Ok(ItemStatus::InFridge),
            "AVAILABLE" => Ok(ItemStatus::Available),
            "CLAIMED" => Ok(ItemStatus::Claimed),
            other => Err(format!("Invalid item status: {}", other)),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Food category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// Food item with its category (and, where relevant, its owner) joined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: Uuid,
    pub title: String,
    pub status: ItemStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub owner_id: Uuid,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserResponse>,
}

/// Request for item creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub category_id: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request for an item status update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemStatusRequest {
    pub status: String,
}

/// Query parameters for the expiring-items listing
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_round_trip() {
        for status in [
            ItemStatus::InFridge,
            ItemStatus::Available,
            ItemStatus::Claimed,
        ] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_item_status_rejects_unknown_value() {
        assert!("EATEN".parse::<ItemStatus>().is_err());
        assert!("available".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_item_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ItemStatus::InFridge).unwrap();
        assert_eq!(json, "\"IN_FRIDGE\"");
    }
}
