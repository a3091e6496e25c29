//! Friend group endpoints: groups, members, shares, and messages

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, conflict_on_unique},
    middleware::CurrentUser,
    models::group::{
        AddMemberRequest, CreateGroupRequest, GroupResponse, PostMessageRequest, ShareItemRequest,
    },
    repositories::item::ItemRow,
    state::AppState,
};

/// Resolve a share target to an item id the caller owns
///
/// A missing item and an item owned by someone else read the same: callers
/// may only share their own items, so neither case reveals more than that.
fn owned_item_id(item: Option<ItemRow>, user_id: Uuid) -> ApiResult<Uuid> {
    match item {
        Some(item) if item.owner_id == user_id => Ok(item.id),
        _ => Err(ApiError::Forbidden(
            "You can only share your own items".to_string(),
        )),
    }
}

/// Load a group and enforce the shared is-owner-or-member rule
///
/// Missing group is 404; a group the caller is neither owner nor member of
/// is 403. Every group-scoped read below goes through this.
async fn load_group_for(
    state: &AppState,
    group_id: Uuid,
    user_id: Uuid,
) -> ApiResult<GroupResponse> {
    let group = state
        .group_repository
        .find_with_members(group_id)
        .await
        .map_err(|e| {
            error!("Failed to load group: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    if !group.is_owner_or_member(user_id) {
        return Err(ApiError::Forbidden(
            "You are not a member of this group".to_string(),
        ));
    }

    Ok(group)
}

/// Create a group owned by the caller
pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let group = state
        .group_repository
        .create(user.id, name)
        .await
        .map_err(|e| {
            error!("Failed to create group: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(group)))
}

/// List the caller's groups (owned or joined), most recent first
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<impl IntoResponse> {
    let groups = state
        .group_repository
        .list_for_user(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list groups: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(groups))
}

/// Fetch one group the caller belongs to
pub async fn get_group(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let group = load_group_for(&state, group_id, user.id).await?;
    Ok(Json(group))
}

/// Add a member to a group the caller owns
///
/// Ownership is strictly required here; plain membership does not suffice.
/// A group that exists but is owned by someone else reads as missing.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<impl IntoResponse> {
    let group = state
        .group_repository
        .find_with_members(group_id)
        .await
        .map_err(|e| {
            error!("Failed to load group: {}", e);
            ApiError::InternalServerError
        })?;

    let group = match group {
        Some(g) if g.owner_id == user.id => g,
        _ => return Err(ApiError::NotFound("Group not found".to_string())),
    };

    let target = state
        .user_repository
        .find_by_id(payload.user_id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?;

    if target.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let duplicate = state
        .group_repository
        .member_exists(group.id, payload.user_id)
        .await
        .map_err(|e| {
            error!("Failed to check membership: {}", e);
            ApiError::InternalServerError
        })?;

    if duplicate {
        return Err(ApiError::Conflict("Already a member".to_string()));
    }

    let member = state
        .group_repository
        .add_member(group.id, payload.user_id, payload.tag.as_deref())
        .await
        // The unique index on (group_id, user_id) closes the race the
        // pre-check above leaves open.
        .map_err(|e| conflict_on_unique(e, "Already a member"))?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Share an item the caller owns into one of their groups
pub async fn share_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<ShareItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let group = load_group_for(&state, group_id, user.id).await?;

    let item = state
        .item_repository
        .find_row(payload.item_id)
        .await
        .map_err(|e| {
            error!("Failed to look up item: {}", e);
            ApiError::InternalServerError
        })?;

    let item_id = owned_item_id(item, user.id)?;

    state
        .group_repository
        .share_item(item_id, group.id)
        .await
        .map_err(|e| {
            error!("Failed to share item: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(json!({"ok": true}))))
}

/// Items shared into a group, most recently shared first
pub async fn list_group_items(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let group = load_group_for(&state, group_id, user.id).await?;

    let items = state
        .group_repository
        .list_group_items(group.id)
        .await
        .map_err(|e| {
            error!("Failed to list group items: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(items))
}

/// Post a chat message to a group the caller belongs to
pub async fn post_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<PostMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let group = load_group_for(&state, group_id, user.id).await?;

    let content = payload.content.trim();
    if content.is_empty() {
        return Err(ApiError::BadRequest(
            "Message content is required".to_string(),
        ));
    }

    let message = state
        .message_repository
        .create(group.id, user.id, content)
        .await
        .map_err(|e| {
            error!("Failed to post message: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Up to 200 most recent messages in chat-reading order
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let group = load_group_for(&state, group_id, user.id).await?;

    let messages = state
        .message_repository
        .list(group.id)
        .await
        .map_err(|e| {
            error!("Failed to list messages: {}", e);
            ApiError::InternalServerError
        })?;

    Ok(Json(messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::ItemStatus;

    fn row(owner_id: Uuid) -> ItemRow {
        ItemRow {
            id: Uuid::new_v4(),
            owner_id,
            status: ItemStatus::InFridge,
        }
    }

    #[test]
    fn test_owned_item_id_accepts_own_item() {
        let user_id = Uuid::new_v4();
        let item = row(user_id);
        let expected = item.id;
        assert_eq!(owned_item_id(Some(item), user_id).unwrap(), expected);
    }

    #[test]
    fn test_owned_item_id_rejects_foreign_item() {
        let item = row(Uuid::new_v4());
        let err = owned_item_id(Some(item), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_owned_item_id_rejects_missing_item() {
        let err = owned_item_id(None, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
