//! Food category repository

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::item::Category;

/// Fixed default set seeded once when none of these names exist yet.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Dairy",
    "Vegetables",
    "Fruits",
    "Meat",
    "Fish",
    "Grains",
    "Beverages",
    "Snacks",
    "Condiments",
    "Leftovers",
];

/// Category repository
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories alphabetically, lazily seeding the defaults
    ///
    /// The seed is a one-time bootstrap: it only runs when none of the
    /// default names are present.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM food_categories WHERE name = ANY($1)",
        )
        .bind(&defaults)
        .fetch_one(&self.pool)
        .await?;

        if existing == 0 {
            info!("Seeding default food categories");
            sqlx::query(
                r#"
                INSERT INTO food_categories (name)
                SELECT unnest($1::text[])
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(&defaults)
            .execute(&self.pool)
            .await?;
        }

        let rows = sqlx::query("SELECT id, name FROM food_categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// Check whether a category id exists
    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_categories WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
