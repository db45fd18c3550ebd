//! Challenge Routes
//!
//! Browsing, creating and taking part in challenges, plus their proof
//! photos and comments.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use super::require_wallet;
use crate::api::dto::{
    ChallengeDetail, CommentRequest, CompleteRequest, JoinRequest, PhotoUploadRequest,
    VoteRequest,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::challenges::{ChallengeFilter, ChallengeForm};
use crate::domain::{
    ActivityKind, Challenge, ChallengePhoto, ChallengeStatus, Comment, UserChallenge,
};
use crate::format::format_time_remaining;
use crate::session::Verification;

/// GET /api/v1/challenges
///
/// Filters: `active`, `category`, `difficulty`, `creator`, `limit`.
pub async fn list_challenges(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ChallengeFilter>,
) -> Json<Vec<Challenge>> {
    let mut board = state.board.write().await;
    board.refresh(Utc::now());
    Json(board.list(&filter))
}

/// POST /api/v1/challenges
pub async fn create_challenge(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ChallengeForm>,
) -> ApiResult<(StatusCode, Json<Challenge>)> {
    require_wallet(&state).await?;

    let creator = state.current_user().await;
    let challenge = state
        .board
        .write()
        .await
        .create(form, &creator.username, Utc::now())?;

    state
        .record_activity(
            ActivityKind::ChallengeCreated,
            Some(&challenge),
            None,
            format!("created \"{}\"", challenge.title),
        )
        .await;
    state.publish_challenge(challenge.clone()).await;

    Ok((StatusCode::CREATED, Json(challenge)))
}

/// GET /api/v1/challenges/:id
pub async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChallengeDetail>> {
    let challenge = state.board.read().await.get(&id)?.clone();
    let participation = state.session.read().await.record(&id).cloned();

    Ok(Json(ChallengeDetail {
        time_remaining: format_time_remaining(challenge.ends_at, Utc::now()),
        challenge,
        participation,
    }))
}

/// POST /api/v1/challenges/:id/join
///
/// Body is optional; stake and currency default to the challenge's.
pub async fn join_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<JoinRequest>>,
) -> ApiResult<(StatusCode, Json<UserChallenge>)> {
    require_wallet(&state).await?;
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let now = Utc::now();

    let (challenge, record) = {
        let mut session = state.session.write().await;
        let mut board = state.board.write().await;

        let (default_stake, default_currency) = {
            let challenge = board.get(&id)?;
            (challenge.stake_amount, challenge.stake_currency)
        };
        let stake = request.stake_amount.unwrap_or(default_stake);
        let currency = request.currency.unwrap_or(default_currency);

        session.ensure_can_join(&id, stake)?;
        let challenge = board.record_join(&id, now)?;
        let record = session.join_challenge(&id, stake, currency, now)?;
        (challenge, record)
    };

    state
        .record_activity(
            ActivityKind::ChallengeJoined,
            Some(&challenge),
            Some(record.stake_amount),
            format!("joined \"{}\"", challenge.title),
        )
        .await;
    state.publish_challenge(challenge).await;

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/v1/challenges/:id/complete
///
/// Marks the user's active participation as submitted for verification.
pub async fn complete_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<CompleteRequest>>,
) -> ApiResult<Json<UserChallenge>> {
    require_wallet(&state).await?;
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let record = state
        .session
        .write()
        .await
        .complete_challenge(&id, request.photo_id)?;
    Ok(Json(record))
}

/// POST /api/v1/challenges/:id/verify
pub async fn verify_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Verification>> {
    require_wallet(&state).await?;

    let user = state.current_user().await;
    let progress = state.achievement_progress(&user).await;
    let verification = state
        .session
        .write()
        .await
        .verify_challenge(&id, &progress, Utc::now())?;

    let succeeded = verification.record.status == ChallengeStatus::Completed;
    let challenge = {
        let mut board = state.board.write().await;
        if succeeded {
            board.record_completion(&id).ok()
        } else {
            board.get(&id).ok().cloned()
        }
    };
    let title = challenge
        .as_ref()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| id.clone());

    if succeeded {
        let payout = verification.record.payout.unwrap_or_default();
        state
            .record_activity(
                ActivityKind::ChallengeCompleted,
                challenge.as_ref(),
                None,
                format!("completed \"{}\"", title),
            )
            .await;
        state
            .record_activity(
                ActivityKind::PayoutReceived,
                challenge.as_ref(),
                Some(payout),
                format!(
                    "received {:.2} {} from \"{}\"",
                    payout, verification.record.stake_currency, title
                ),
            )
            .await;
    }
    for achievement in &verification.unlocked {
        state
            .record_activity(
                ActivityKind::AchievementUnlocked,
                None,
                None,
                format!("unlocked \"{}\" achievement", achievement.title),
            )
            .await;
    }
    if let Some(challenge) = challenge {
        state.publish_challenge(challenge).await;
    }

    Ok(Json(verification))
}

/// POST /api/v1/challenges/:id/forfeit
pub async fn forfeit_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserChallenge>> {
    require_wallet(&state).await?;
    let record = state
        .session
        .write()
        .await
        .forfeit_challenge(&id, Utc::now())?;
    Ok(Json(record))
}

/// GET /api/v1/challenges/:id/photos
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<ChallengePhoto>>> {
    Ok(Json(state.board.read().await.photos(&id)?))
}

/// POST /api/v1/challenges/:id/photos
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<PhotoUploadRequest>,
) -> ApiResult<(StatusCode, Json<ChallengePhoto>)> {
    require_wallet(&state).await?;
    let user = state.current_user().await;

    let (photo, challenge) = {
        let mut board = state.board.write().await;
        let photo = board.add_photo(
            &id,
            &user,
            &request.image_url,
            &request.description,
            Utc::now(),
        )?;
        (photo, board.get(&id)?.clone())
    };
    tracing::info!(challenge_id = %id, photo_id = %photo.id, "Photo uploaded");
    state.publish_challenge(challenge).await;

    Ok((StatusCode::CREATED, Json(photo)))
}

/// POST /api/v1/photos/:id/vote
///
/// Repeating a vote withdraws it.
pub async fn vote_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<Json<ChallengePhoto>> {
    let (photo, challenge) = {
        let mut board = state.board.write().await;
        let photo = board.vote_photo(&photo_id, request.vote)?;
        let challenge = board.get(&photo.challenge_id).ok().cloned();
        (photo, challenge)
    };
    if let Some(challenge) = challenge {
        state.publish_challenge(challenge).await;
    }
    Ok(Json(photo))
}

/// GET /api/v1/challenges/:id/comments
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(state.board.read().await.comments(&id)?))
}

/// POST /api/v1/challenges/:id/comments
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    require_wallet(&state).await?;
    let user = state.current_user().await;
    let comment = state
        .board
        .write()
        .await
        .add_comment(&id, &user, &request.content, Utc::now())?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// POST /api/v1/comments/:id/like
pub async fn toggle_comment_like(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<Comment>> {
    Ok(Json(state.board.write().await.toggle_comment_like(&comment_id)?))
}
