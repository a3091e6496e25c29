//! Legacy donation repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::donation::Donation;

fn donation_from_row(row: &PgRow) -> Donation {
    Donation {
        id: row.get("id"),
        item: row.get("item"),
        quantity: row.get("quantity"),
        location: row.get("location"),
        created_at: row.get("created_at"),
    }
}

/// Donation repository
#[derive(Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    /// Create a new donation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all donations, most recent first
    pub async fn list(&self) -> Result<Vec<Donation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item, quantity, location, created_at
            FROM donations
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(donation_from_row).collect())
    }

    /// Create a donation entry
    pub async fn create(&self, item: &str, quantity: &str, location: &str) -> Result<Donation> {
        let row = sqlx::query(
            r#"
            INSERT INTO donations (item, quantity, location)
            VALUES ($1, $2, $3)
            RETURNING id, item, quantity, location, created_at
            "#,
        )
        .bind(item)
        .bind(quantity)
        .bind(location)
        .fetch_one(&self.pool)
        .await?;

        Ok(donation_from_row(&row))
    }
}
