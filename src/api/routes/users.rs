//! User Routes
//!
//! Public profiles and following.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::require_wallet;
use crate::api::dto::FollowResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::DomainError;
use crate::social::ProfileView;

/// GET /api/v1/users/:user
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfileView>> {
    let users = state.all_users().await;
    let board = state.board.read().await;
    let feed = state.feed.read().await;
    Ok(Json(ProfileView::lookup(&username, &users, &board, &feed)?))
}

/// POST /api/v1/users/:user/follow
pub async fn follow_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    set_following(&state, &user_id, true).await
}

/// DELETE /api/v1/users/:user/follow
pub async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    set_following(&state, &user_id, false).await
}

async fn set_following(
    state: &AppState,
    user_id: &str,
    follow: bool,
) -> ApiResult<Json<FollowResponse>> {
    require_wallet(state).await?;

    let mut session = state.session.write().await;
    let mut users = state.users.write().await;
    let is_self = session.current_user().id == user_id;
    let target = users.iter_mut().find(|u| u.id == user_id);
    if target.is_none() && !is_self {
        return Err(DomainError::UserNotFound(user_id.to_string()).into());
    }

    // Following yourself is rejected by the session
    let changed = if follow {
        session.follow(user_id)?
    } else {
        session.unfollow(user_id)
    };
    if let Some(target) = target.filter(|_| changed) {
        if follow {
            target.followers += 1;
        } else {
            target.followers = target.followers.saturating_sub(1);
        }
    }

    Ok(Json(FollowResponse {
        user_id: user_id.to_string(),
        following: session.is_following(user_id),
        changed,
        following_count: session.current_user().following,
    }))
}
