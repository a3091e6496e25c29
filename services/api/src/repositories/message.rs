//! Group message repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{group::MessageResponse, user::UserResponse};

/// Upper bound on a single chat listing.
const MESSAGE_LIMIT: i64 = 200;

fn message_from_row(row: &PgRow) -> MessageResponse {
    MessageResponse {
        id: row.get("id"),
        group_id: row.get("group_id"),
        author_id: row.get("author_id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        author: UserResponse {
            id: row.get("author_id"),
            name: row.get("a_name"),
            email: row.get("a_email"),
            created_at: row.get("a_created_at"),
        },
    }
}

/// Group message repository
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a message authored by `author_id`
    ///
    /// Content is expected to be already trimmed and non-empty.
    pub async fn create(
        &self,
        group_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<MessageResponse> {
        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO group_messages (group_id, author_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, group_id, author_id, content, created_at
            )
            SELECT i.id, i.group_id, i.author_id, i.content, i.created_at,
                   u.name AS a_name, u.email AS a_email, u.created_at AS a_created_at
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(group_id)
        .bind(author_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message_from_row(&row))
    }

    /// Up to 200 most recent messages, returned oldest first
    ///
    /// The query grabs the newest window descending, then flips it into
    /// chat-reading order.
    pub async fn list(&self, group_id: Uuid) -> Result<Vec<MessageResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT m.id, m.group_id, m.author_id, m.content, m.created_at,
                   u.name AS a_name, u.email AS a_email, u.created_at AS a_created_at
            FROM group_messages m
            JOIN users u ON u.id = m.author_id
            WHERE m.group_id = $1
            ORDER BY m.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(group_id)
        .bind(MESSAGE_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let mut messages: Vec<MessageResponse> =
            rows.iter().map(message_from_row).collect();
        messages.reverse();

        Ok(messages)
    }
}
