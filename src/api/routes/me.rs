//! Current User Routes

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::require_wallet;
use crate::api::dto::{MeResponse, MyAchievementsResponse, MyChallengesQuery};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::domain::{ChallengeStatus, User, UserChallenge};
use crate::mock::achievement_catalog;
use crate::session::UserSettings;
use crate::social::held_by;

/// GET /api/v1/me
pub async fn get_me(State(state): State<Arc<AppState>>) -> ApiResult<Json<MeResponse>> {
    require_wallet(&state).await?;
    let session = state.session.read().await;

    Ok(Json(MeResponse {
        user: session.current_user().clone(),
        total_active_stake: session.total_active_stake(),
        active_challenges: session.by_status(ChallengeStatus::Active).len(),
        completed_challenges: session.by_status(ChallengeStatus::Completed).len(),
        wallet_connected: true,
    }))
}

/// PATCH /api/v1/me/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<UserSettings>,
) -> ApiResult<Json<User>> {
    require_wallet(&state).await?;
    let (previous, user) = {
        let mut session = state.session.write().await;
        let previous = session.current_user().username.clone();
        (previous, session.update_settings(settings)?)
    };
    if previous != user.username {
        let renamed = state
            .board
            .write()
            .await
            .rename_creator(&previous, &user.username);
        state.feed.write().await.rename_user(&previous, &user.username);
        tracing::info!(from = %previous, to = %user.username, challenges = renamed, "Username changed");
    }
    tracing::info!(username = %user.username, "Settings updated");
    Ok(Json(user))
}

/// GET /api/v1/me/challenges
///
/// All participation records, or those with `status`.
pub async fn my_challenges(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MyChallengesQuery>,
) -> ApiResult<Json<Vec<UserChallenge>>> {
    require_wallet(&state).await?;
    let session = state.session.read().await;
    let records = match query.status {
        Some(status) => session.by_status(status),
        None => session.user_challenges().to_vec(),
    };
    Ok(Json(records))
}

/// GET /api/v1/me/achievements
pub async fn my_achievements(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MyAchievementsResponse>> {
    require_wallet(&state).await?;
    let user = state.current_user().await;

    let locked = achievement_catalog()
        .into_iter()
        .filter(|a| !user.has_achievement(&a.id))
        .collect();
    Ok(Json(MyAchievementsResponse {
        unlocked: held_by(&user),
        locked,
    }))
}
