//! Friend group, membership, and group message models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserResponse;

/// Group member with the linked user joined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tag: Option<String>,
    pub user: UserResponse,
}

/// Friend group with owner and member list joined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub owner: UserResponse,
    pub members: Vec<MemberResponse>,
}

impl GroupResponse {
    /// Shared authorization predicate: the group owner counts as a member.
    ///
    /// Used uniformly by group read, item sharing, group item listing, and
    /// messaging.
    pub fn is_owner_or_member(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id || self.members.iter().any(|m| m.user_id == user_id)
    }
}

/// Request for group creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Request for adding a member to a group
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub tag: Option<String>,
}

/// Request for sharing an item into a group
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareItemRequest {
    pub item_id: Uuid,
}

/// Request for posting a group message
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

/// Group chat message with its author joined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub group_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: Uuid) -> UserResponse {
        UserResponse {
            id,
            name: "a".to_string(),
            email: "a@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn group(owner_id: Uuid, member_ids: &[Uuid]) -> GroupResponse {
        GroupResponse {
            id: Uuid::new_v4(),
            name: "Flatmates".to_string(),
            owner_id,
            created_at: Utc::now(),
            owner: user(owner_id),
            members: member_ids
                .iter()
                .map(|&id| MemberResponse {
                    id: Uuid::new_v4(),
                    user_id: id,
                    tag: None,
                    user: user(id),
                })
                .collect(),
        }
    }

    #[test]
    fn test_owner_counts_as_member() {
        let owner = Uuid::new_v4();
        let g = group(owner, &[]);
        assert!(g.is_owner_or_member(owner));
    }

    #[test]
    fn test_listed_member_is_authorized() {
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let g = group(owner, &[member]);
        assert!(g.is_owner_or_member(member));
    }

    #[test]
    fn test_outsider_is_not_authorized() {
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();
        let g = group(owner, &[member]);
        assert!(!g.is_owner_or_member(Uuid::new_v4()));
    }
}
