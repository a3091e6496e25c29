//! Claim models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::{item::ItemResponse, user::UserResponse};

/// Lifecycle status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Accepted => "ACCEPTED",
            ClaimStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ClaimStatus::Pending),
            "ACCEPTED" => Ok(ClaimStatus::Accepted),
            "REJECTED" => Ok(ClaimStatus::Rejected),
            other => Err(format!("Invalid claim status: {}", other)),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owner's verdict on a claim: ACCEPTED or REJECTED, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimDecision {
    Accepted,
    Rejected,
}

impl ClaimDecision {
    pub fn status(&self) -> ClaimStatus {
        match self {
            ClaimDecision::Accepted => ClaimStatus::Accepted,
            ClaimDecision::Rejected => ClaimStatus::Rejected,
        }
    }
}

impl FromStr for ClaimDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPTED" => Ok(ClaimDecision::Accepted),
            "REJECTED" => Ok(ClaimDecision::Rejected),
            other => Err(format!("Invalid decision: {}", other)),
        }
    }
}

/// Claim with item and/or claimer joined depending on the listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub claimer_id: Uuid,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimer: Option<UserResponse>,
}

/// Request for claim creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub item_id: Uuid,
}

/// Request for a claim decision
#[derive(Debug, Clone, Deserialize)]
pub struct DecideClaimRequest {
    pub decision: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_status_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Accepted,
            ClaimStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_decision_accepts_only_terminal_statuses() {
        assert_eq!(
            "ACCEPTED".parse::<ClaimDecision>().unwrap().status(),
            ClaimStatus::Accepted
        );
        assert_eq!(
            "REJECTED".parse::<ClaimDecision>().unwrap().status(),
            ClaimStatus::Rejected
        );
        assert!("PENDING".parse::<ClaimDecision>().is_err());
        assert!("accepted".parse::<ClaimDecision>().is_err());
    }
}
