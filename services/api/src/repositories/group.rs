//! Friend group repository: groups, membership, and item shares

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    group::{GroupResponse, MemberResponse},
    item::ItemResponse,
    user::UserResponse,
};
use crate::repositories::item::{ITEM_WITH_OWNER_SELECT, item_from_row};

/// Friend group repository
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group owned by `owner_id`
    pub async fn create(&self, owner_id: Uuid, name: &str) -> Result<GroupResponse> {
        info!("Creating group '{}' for owner {}", name, owner_id);

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO friend_groups (name, owner_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        let group = self
            .find_with_members(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Group vanished right after creation"))?;

        Ok(group)
    }

    /// Load a group with its owner and member list joined
    pub async fn find_with_members(&self, group_id: Uuid) -> Result<Option<GroupResponse>> {
        let row = sqlx::query(
            r#"
            SELECT g.id, g.name, g.owner_id, g.created_at,
                   u.name AS o_name, u.email AS o_email, u.created_at AS o_created_at
            FROM friend_groups g
            JOIN users u ON u.id = g.owner_id
            WHERE g.id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let owner_id: Uuid = row.get("owner_id");
        let group = GroupResponse {
            id: row.get("id"),
            name: row.get("name"),
            owner_id,
            created_at: row.get("created_at"),
            owner: UserResponse {
                id: owner_id,
                name: row.get("o_name"),
                email: row.get("o_email"),
                created_at: row.get("o_created_at"),
            },
            members: self.list_members(group_id).await?,
        };

        Ok(Some(group))
    }

    /// List the groups where `user_id` is owner or member, most recent first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<GroupResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT g.id
            FROM friend_groups g
            WHERE g.owner_id = $1
               OR EXISTS (
                   SELECT 1 FROM group_members m
                   WHERE m.group_id = g.id AND m.user_id = $1
               )
            ORDER BY g.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.get("id");
            if let Some(group) = self.find_with_members(id).await? {
                groups.push(group);
            }
        }

        Ok(groups)
    }

    /// List the members of a group with their users joined
    async fn list_members(&self, group_id: Uuid) -> Result<Vec<MemberResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.user_id, m.tag,
                   u.name, u.email, u.created_at
            FROM group_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let user_id: Uuid = row.get("user_id");
                MemberResponse {
                    id: row.get("id"),
                    user_id,
                    tag: row.get("tag"),
                    user: UserResponse {
                        id: user_id,
                        name: row.get("name"),
                        email: row.get("email"),
                        created_at: row.get("created_at"),
                    },
                }
            })
            .collect())
    }

    /// Check whether a user is already listed as a member
    pub async fn member_exists(&self, group_id: Uuid, user_id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM group_members WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Add a member to a group
    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        tag: Option<&str>,
    ) -> Result<MemberResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, tag)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, tag
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;

        let user_row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(MemberResponse {
            id: row.get("id"),
            user_id: row.get("user_id"),
            tag: row.get("tag"),
            user: UserResponse {
                id: user_row.get("id"),
                name: user_row.get("name"),
                email: user_row.get("email"),
                created_at: user_row.get("created_at"),
            },
        })
    }

    /// Share an item into a group, idempotently
    ///
    /// Re-sharing the same (item, group) pair is a no-op, not an error.
    pub async fn share_item(&self, item_id: Uuid, group_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO group_shares (item_id, group_id)
            VALUES ($1, $2)
            ON CONFLICT (item_id, group_id) DO NOTHING
            "#,
        )
        .bind(item_id)
        .bind(group_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Items shared into a group, owner and category joined, newest share first
    pub async fn list_group_items(&self, group_id: Uuid) -> Result<Vec<ItemResponse>> {
        let rows = sqlx::query(&format!(
            r#"{}
            JOIN group_shares gs ON gs.item_id = i.id
            WHERE gs.group_id = $1
            ORDER BY gs.created_at DESC
            "#,
            ITEM_WITH_OWNER_SELECT
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| item_from_row(row, true)).collect()
    }
}
