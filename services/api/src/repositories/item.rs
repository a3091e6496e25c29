//! Food item repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use chrono::{DateTime, Utc};

use crate::models::{
    item::{Category, ItemResponse, ItemStatus},
    user::UserResponse,
};

/// Item columns with the category joined, used by every item listing.
pub(crate) const ITEM_SELECT: &str = r#"
    SELECT i.id, i.title, i.status, i.expires_at, i.owner_id, i.category_id, i.created_at,
           c.id AS c_id, c.name AS c_name
    FROM food_items i
    LEFT JOIN food_categories c ON c.id = i.category_id
"#;

/// Same projection with the owning user joined as well.
pub(crate) const ITEM_WITH_OWNER_SELECT: &str = r#"
    SELECT i.id, i.title, i.status, i.expires_at, i.owner_id, i.category_id, i.created_at,
           c.id AS c_id, c.name AS c_name,
           u.id AS o_id, u.name AS o_name, u.email AS o_email, u.created_at AS o_created_at
    FROM food_items i
    LEFT JOIN food_categories c ON c.id = i.category_id
    JOIN users u ON u.id = i.owner_id
"#;

/// Map a row produced by one of the projections above into an `ItemResponse`.
pub(crate) fn item_from_row(row: &PgRow, with_owner: bool) -> Result<ItemResponse> {
    let status: ItemStatus = row
        .get::<String, _>("status")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let category = row
        .get::<Option<Uuid>, _>("c_id")
        .map(|id| Category {
            id,
            name: row.get("c_name"),
        });

    let owner = if with_owner {
        Some(UserResponse {
            id: row.get("o_id"),
            name: row.get("o_name"),
            email: row.get("o_email"),
            created_at: row.get("o_created_at"),
        })
    } else {
        None
    };

    Ok(ItemResponse {
        id: row.get("id"),
        title: row.get("title"),
        status,
        expires_at: row.get("expires_at"),
        owner_id: row.get("owner_id"),
        category_id: row.get("category_id"),
        created_at: row.get("created_at"),
        category,
        owner,
    })
}

/// Bare item row used for ownership and availability checks
#[derive(Debug, Clone)]
pub struct ItemRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub status: ItemStatus,
}

/// Food item repository
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new item owned by `owner_id`, defaulting to IN_FRIDGE
    pub async fn create(
        &self,
        owner_id: Uuid,
        title: &str,
        category_id: Option<Uuid>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ItemResponse> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO food_items (title, status, expires_at, owner_id, category_id)
            VALUES ($1, 'IN_FRIDGE', $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(expires_at)
        .bind(owner_id)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        let row = sqlx::query(&format!("{} WHERE i.id = $1", ITEM_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        item_from_row(&row, false)
    }

    /// List all items owned by `owner_id`, most recent first
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<ItemResponse>> {
        let rows = sqlx::query(&format!(
            "{} WHERE i.owner_id = $1 ORDER BY i.created_at DESC",
            ITEM_SELECT
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| item_from_row(row, false)).collect()
    }

    /// Update an item's status, scoped to its owner
    ///
    /// The lookup is on (id, owner_id), so an item owned by someone else is
    /// indistinguishable from a missing one: both return `None`.
    pub async fn update_status(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
        status: ItemStatus,
    ) -> Result<Option<ItemResponse>> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE food_items
            SET status = $1
            WHERE id = $2 AND owner_id = $3
            RETURNING id
            "#,
        )
        .bind(status.as_str())
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => {
                let row = sqlx::query(&format!("{} WHERE i.id = $1", ITEM_SELECT))
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?;
                Ok(Some(item_from_row(&row, false)?))
            }
            None => Ok(None),
        }
    }

    /// List the caller's IN_FRIDGE items expiring within `days`, soonest first
    pub async fn list_expiring(&self, owner_id: Uuid, days: i64) -> Result<Vec<ItemResponse>> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE i.owner_id = $1
              AND i.status = 'IN_FRIDGE'
              AND i.expires_at IS NOT NULL
              AND i.expires_at <= now() + ($2 * INTERVAL '1 day')
            ORDER BY i.expires_at ASC
            "#,
            ITEM_SELECT
        ))
        .bind(owner_id)
        .bind(days)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| item_from_row(row, false)).collect()
    }

    /// List AVAILABLE items owned by anyone but the caller: the claim pool
    pub async fn list_available(&self, caller_id: Uuid) -> Result<Vec<ItemResponse>> {
        let rows = sqlx::query(&format!(
            r#"{}
            WHERE i.status = 'AVAILABLE' AND i.owner_id <> $1
            ORDER BY i.created_at DESC
            "#,
            ITEM_WITH_OWNER_SELECT
        ))
        .bind(caller_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| item_from_row(row, true)).collect()
    }

    /// Fetch the bare owner/status row for authorization checks
    pub async fn find_row(&self, item_id: Uuid) -> Result<Option<ItemRow>> {
        let row = sqlx::query("SELECT id, owner_id, status FROM food_items WHERE id = $1")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let status: ItemStatus = row
                    .get::<String, _>("status")
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                Ok(Some(ItemRow {
                    id: row.get("id"),
                    owner_id: row.get("owner_id"),
                    status,
                }))
            }
            None => Ok(None),
        }
    }
}
