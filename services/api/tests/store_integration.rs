//! Integration tests for the claim, share, and message store logic
//!
//! These tests exercise the repositories against a live PostgreSQL database.
//! They require a `DATABASE_URL` pointing at a database the suite may write
//! to; migrations are applied on setup.

use anyhow::Result;
use axum::http::StatusCode;
use common::database::{DatabaseConfig, init_pool};
use sqlx::PgPool;
use uuid::Uuid;

use api::error::conflict_on_unique;
use api::models::claim::{ClaimDecision, ClaimStatus};
use api::models::item::ItemStatus;
use api::repositories::{
    ClaimRepository, GroupRepository, ItemRepository, MessageRepository, UserRepository,
};

async fn setup_pool() -> Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_claim_acceptance_marks_item_and_decides_once() -> Result<()> {
    let pool = setup_pool().await?;
    let users = UserRepository::new(pool.clone());
    let items = ItemRepository::new(pool.clone());
    let claims = ClaimRepository::new(pool.clone());

    let owner = users
        .create("Owner", &unique_email("owner"), "password123")
        .await?;
    let claimer = users
        .create("Claimer", &unique_email("claimer"), "password123")
        .await?;

    let item = items.create(owner.id, "Leftover soup", None, None).await?;
    items
        .update_status(item.id, owner.id, ItemStatus::Available)
        .await?;

    let claim = claims.create(item.id, claimer.id).await?;
    assert_eq!(claim.status, ClaimStatus::Pending);
    assert!(claim.decided_at.is_none());

    let row = claims
        .find_row(claim.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("claim row missing"))?;

    let decided = claims
        .decide(&row, ClaimDecision::Accepted)
        .await?
        .ok_or_else(|| anyhow::anyhow!("first decision should win"))?;
    assert_eq!(decided.status, ClaimStatus::Accepted);
    assert!(decided.decided_at.is_some());

    let item_row = items
        .find_row(item.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("item row missing"))?;
    assert_eq!(item_row.status, ItemStatus::Claimed);

    // A decided claim stays decided: the second attempt must not overwrite
    // the stored decision or its timestamp.
    let second = claims.decide(&row, ClaimDecision::Rejected).await?;
    assert!(second.is_none());

    let row = claims
        .find_row(claim.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("claim row missing"))?;
    assert_eq!(row.status, ClaimStatus::Accepted);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_claim_rejection_leaves_item_available() -> Result<()> {
    let pool = setup_pool().await?;
    let users = UserRepository::new(pool.clone());
    let items = ItemRepository::new(pool.clone());
    let claims = ClaimRepository::new(pool.clone());

    let owner = users
        .create("Owner", &unique_email("owner"), "password123")
        .await?;
    let claimer = users
        .create("Claimer", &unique_email("claimer"), "password123")
        .await?;

    let item = items.create(owner.id, "Half a cake", None, None).await?;
    items
        .update_status(item.id, owner.id, ItemStatus::Available)
        .await?;

    let claim = claims.create(item.id, claimer.id).await?;
    let row = claims
        .find_row(claim.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("claim row missing"))?;

    let decided = claims
        .decide(&row, ClaimDecision::Rejected)
        .await?
        .ok_or_else(|| anyhow::anyhow!("first decision should win"))?;
    assert_eq!(decided.status, ClaimStatus::Rejected);
    assert!(decided.decided_at.is_some());

    let item_row = items
        .find_row(item.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("item row missing"))?;
    assert_eq!(item_row.status, ItemStatus::Available);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_share_item_is_idempotent() -> Result<()> {
    let pool = setup_pool().await?;
    let users = UserRepository::new(pool.clone());
    let items = ItemRepository::new(pool.clone());
    let groups = GroupRepository::new(pool.clone());

    let owner = users
        .create("Owner", &unique_email("owner"), "password123")
        .await?;
    let group = groups.create(owner.id, "Neighbours").await?;
    let item = items.create(owner.id, "Jar of pickles", None, None).await?;

    groups.share_item(item.id, group.id).await?;
    groups.share_item(item.id, group.id).await?;

    let shared = groups.list_group_items(group.id).await?;
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, item.id);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_message_list_caps_at_200_in_reading_order() -> Result<()> {
    let pool = setup_pool().await?;
    let users = UserRepository::new(pool.clone());
    let groups = GroupRepository::new(pool.clone());
    let messages = MessageRepository::new(pool.clone());

    let owner = users
        .create("Owner", &unique_email("owner"), "password123")
        .await?;
    let group = groups.create(owner.id, "Chatty").await?;

    for i in 0..205 {
        messages
            .create(group.id, owner.id, &format!("msg {}", i))
            .await?;
    }

    let listed = messages.list(group.id).await?;
    assert_eq!(listed.len(), 200);
    // Oldest first within the retained window: the first five fall off.
    assert_eq!(listed[0].content, "msg 5");
    assert_eq!(listed[199].content, "msg 204");
    for pair in listed.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_duplicate_email_surfaces_as_conflict() -> Result<()> {
    let pool = setup_pool().await?;
    let users = UserRepository::new(pool.clone());

    let email = unique_email("dup");
    users.create("First", &email, "password123").await?;

    let err = users
        .create("Second", &email, "password123")
        .await
        .expect_err("duplicate email should be rejected");

    let api_err = conflict_on_unique(err, "Email already registered");
    assert_eq!(api_err.status_code(), StatusCode::CONFLICT);

    Ok(())
}
