//! Claim repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{
    claim::{ClaimDecision, ClaimResponse, ClaimStatus},
    item::{Category, ItemResponse, ItemStatus},
    user::UserResponse,
};

/// Claim columns with the claimed item (and its category) and the claimer
/// joined.
const CLAIM_SELECT: &str = r#"
    SELECT cl.id, cl.item_id, cl.claimer_id, cl.status, cl.created_at, cl.decided_at,
           i.title AS i_title, i.status AS i_status, i.expires_at AS i_expires_at,
           i.owner_id AS i_owner_id, i.category_id AS i_category_id,
           i.created_at AS i_created_at,
           c.id AS c_id, c.name AS c_name,
           u.name AS u_name, u.email AS u_email, u.created_at AS u_created_at
    FROM claims cl
    JOIN food_items i ON i.id = cl.item_id
    LEFT JOIN food_categories c ON c.id = i.category_id
    JOIN users u ON u.id = cl.claimer_id
"#;

fn claim_from_row(row: &PgRow, with_item: bool, with_claimer: bool) -> Result<ClaimResponse> {
    let status: ClaimStatus = row
        .get::<String, _>("status")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let item = if with_item {
        let item_status: ItemStatus = row
            .get::<String, _>("i_status")
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Some(ItemResponse {
            id: row.get("item_id"),
            title: row.get("i_title"),
            status: item_status,
            expires_at: row.get("i_expires_at"),
            owner_id: row.get("i_owner_id"),
            category_id: row.get("i_category_id"),
            created_at: row.get("i_created_at"),
            category: row.get::<Option<Uuid>, _>("c_id").map(|id| Category {
                id,
                name: row.get("c_name"),
            }),
            owner: None,
        })
    } else {
        None
    };

    let claimer = if with_claimer {
        Some(UserResponse {
            id: row.get("claimer_id"),
            name: row.get("u_name"),
            email: row.get("u_email"),
            created_at: row.get("u_created_at"),
        })
    } else {
        None
    };

    Ok(ClaimResponse {
        id: row.get("id"),
        item_id: row.get("item_id"),
        claimer_id: row.get("claimer_id"),
        status,
        created_at: row.get("created_at"),
        decided_at: row.get("decided_at"),
        item,
        claimer,
    })
}

/// Bare claim row used for the owner and status checks before a decision
#[derive(Debug, Clone)]
pub struct ClaimRow {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_owner_id: Uuid,
    pub status: ClaimStatus,
}

/// Claim repository
#[derive(Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Create a new claim repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a PENDING claim, returning it with the claimer joined
    pub async fn create(&self, item_id: Uuid, claimer_id: Uuid) -> Result<ClaimResponse> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO claims (item_id, claimer_id, status)
            VALUES ($1, $2, 'PENDING')
            RETURNING id
            "#,
        )
        .bind(item_id)
        .bind(claimer_id)
        .fetch_one(&self.pool)
        .await?;

        let row = sqlx::query(&format!("{} WHERE cl.id = $1", CLAIM_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        claim_from_row(&row, false, true)
    }

    /// Claims on items owned by `owner_id`, item and claimer joined
    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<ClaimResponse>> {
        let rows = sqlx::query(&format!(
            "{} WHERE i.owner_id = $1 ORDER BY cl.created_at DESC",
            CLAIM_SELECT
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| claim_from_row(row, true, true))
            .collect()
    }

    /// Claims made by `claimer_id`, item joined
    pub async fn list_for_claimer(&self, claimer_id: Uuid) -> Result<Vec<ClaimResponse>> {
        let rows = sqlx::query(&format!(
            "{} WHERE cl.claimer_id = $1 ORDER BY cl.created_at DESC",
            CLAIM_SELECT
        ))
        .bind(claimer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| claim_from_row(row, true, false))
            .collect()
    }

    /// Fetch the claim plus the owner of its item, for the decision check
    pub async fn find_row(&self, claim_id: Uuid) -> Result<Option<ClaimRow>> {
        let row = sqlx::query(
            r#"
            SELECT cl.id, cl.item_id, cl.status, i.owner_id AS item_owner_id
            FROM claims cl
            JOIN food_items i ON i.id = cl.item_id
            WHERE cl.id = $1
            "#,
        )
        .bind(claim_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let status: ClaimStatus = row
                    .get::<String, _>("status")
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                Ok(Some(ClaimRow {
                    id: row.get("id"),
                    item_id: row.get("item_id"),
                    item_owner_id: row.get("item_owner_id"),
                    status,
                }))
            }
            None => Ok(None),
        }
    }

    /// Apply the owner's decision to a still-PENDING claim
    ///
    /// Sets the claim status and decided_at exactly once; an acceptance also
    /// transitions the claimed item to CLAIMED. The two writes share one
    /// transaction so a partial failure rolls both back. Returns `None` when
    /// the claim was already decided, including a race between two decision
    /// requests: the status predicate on the UPDATE makes the first writer
    /// win.
    pub async fn decide(
        &self,
        claim: &ClaimRow,
        decision: ClaimDecision,
    ) -> Result<Option<ClaimResponse>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE claims
            SET status = $1, decided_at = now()
            WHERE id = $2 AND status = 'PENDING'
            RETURNING id, item_id, claimer_id, status, created_at, decided_at
            "#,
        )
        .bind(decision.status().as_str())
        .bind(claim.id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if decision == ClaimDecision::Accepted {
            sqlx::query("UPDATE food_items SET status = 'CLAIMED' WHERE id = $1")
                .bind(claim.item_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let status: ClaimStatus = row
            .get::<String, _>("status")
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        Ok(Some(ClaimResponse {
            id: row.get("id"),
            item_id: row.get("item_id"),
            claimer_id: row.get("claimer_id"),
            status,
            created_at: row.get("created_at"),
            decided_at: row.get("decided_at"),
            item: None,
            claimer: None,
        }))
    }
}
