//! Staking Routes
//!
//! The stake flow: stake tokens on a challenge, wait out the countdown,
//! attach a proof photo, then submit (paid `stake * 1.2`) or quit (stake lost).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::require_wallet;
use crate::api::dto::{
    OpenStake, PoolResponse, ProofPhotoRequest, SettleResponse, StakeBalanceResponse,
    StakeCreatedResponse, StakeRequest, StakeView,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::domain::ActivityKind;
use crate::staking::{
    format_countdown, payout_for, ActiveChallenge, ChallengeResult, PoolStats, DURATION_PRESETS,
    MAX_STAKE, MIN_STAKE, PAYOUT_MULTIPLIER,
};
use crate::websocket::WsEvent;

impl StakeView {
    pub fn of(stake: &ActiveChallenge, now: DateTime<Utc>) -> Self {
        let remaining = stake.remaining(now);
        Self {
            remaining_seconds: remaining.num_seconds(),
            countdown: format_countdown(remaining),
            urgency: stake.urgency(now),
            potential_payout: payout_for(stake.stake_amount, true),
            stake: stake.clone(),
        }
    }
}

fn no_running_stake(challenge_id: &str) -> ApiError {
    ApiError::NotFound(format!("No running stake for challenge {}", challenge_id))
}

/// GET /api/v1/stakes/balance
pub async fn balance(State(state): State<Arc<AppState>>) -> ApiResult<Json<StakeBalanceResponse>> {
    require_wallet(&state).await?;

    let open_stakes = state
        .wallet
        .open_stakes()
        .await
        .into_iter()
        .map(|(challenge_id, transaction)| OpenStake {
            challenge_id,
            transaction,
        })
        .collect();

    Ok(Json(StakeBalanceResponse {
        balance: state.wallet.balance().await,
        open_stakes,
    }))
}

/// POST /api/v1/stakes
pub async fn create_stake(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StakeRequest>,
) -> ApiResult<(StatusCode, Json<StakeCreatedResponse>)> {
    require_wallet(&state).await?;
    let now = Utc::now();

    state.board.read().await.get(&request.challenge_id)?;
    let stake = ActiveChallenge::start(
        request.challenge_id.clone(),
        request.amount,
        request.duration_minutes,
        now,
    )?;
    let transaction = state
        .wallet
        .stake_tokens(request.amount, &request.challenge_id)
        .await?;

    state
        .stakes
        .write()
        .await
        .insert(request.challenge_id.clone(), stake.clone());

    let balance = state.wallet.balance().await;
    state.ws_hub.publish(WsEvent::balance(balance)).await;

    Ok((
        StatusCode::CREATED,
        Json(StakeCreatedResponse {
            view: StakeView::of(&stake, now),
            transaction,
            balance,
        }),
    ))
}

/// GET /api/v1/stakes/:challenge_id
pub async fn get_stake(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> ApiResult<Json<StakeView>> {
    require_wallet(&state).await?;
    let stakes = state.stakes.read().await;
    let stake = stakes
        .get(&challenge_id)
        .ok_or_else(|| no_running_stake(&challenge_id))?;
    Ok(Json(StakeView::of(stake, Utc::now())))
}

/// POST /api/v1/stakes/:challenge_id/photo
///
/// Only accepted once the countdown has run out.
pub async fn attach_photo(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
    Json(request): Json<ProofPhotoRequest>,
) -> ApiResult<Json<StakeView>> {
    require_wallet(&state).await?;
    let now = Utc::now();

    let mut stakes = state.stakes.write().await;
    let stake = stakes
        .get_mut(&challenge_id)
        .ok_or_else(|| no_running_stake(&challenge_id))?;
    stake.attach_photo(request.photo_url, now)?;
    Ok(Json(StakeView::of(stake, now)))
}

/// POST /api/v1/stakes/:challenge_id/submit
pub async fn submit_proof(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> ApiResult<Json<SettleResponse>> {
    require_wallet(&state).await?;

    let mut stake = state
        .stakes
        .read()
        .await
        .get(&challenge_id)
        .cloned()
        .ok_or_else(|| no_running_stake(&challenge_id))?;
    let result = stake.submit_proof()?;

    let response = settle(&state, &challenge_id, result).await?;

    let challenge = state.board.read().await.get(&challenge_id).ok().cloned();
    let title = challenge
        .as_ref()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| challenge_id.clone());
    state
        .record_activity(
            ActivityKind::PayoutReceived,
            challenge.as_ref(),
            Some(response.payout.amount),
            format!("received {:.2} tokens from \"{}\"", response.payout.amount, title),
        )
        .await;

    Ok(Json(response))
}

/// POST /api/v1/stakes/:challenge_id/quit
///
/// Also settles stakes left in the ledger by an earlier run.
pub async fn quit(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> ApiResult<Json<SettleResponse>> {
    require_wallet(&state).await?;

    let running = state.stakes.read().await.get(&challenge_id).cloned();
    let result = match running {
        Some(mut stake) => stake.quit()?,
        None => {
            let transaction = state
                .wallet
                .stake_for(&challenge_id)
                .await
                .ok_or_else(|| no_running_stake(&challenge_id))?;
            ChallengeResult::new(false, transaction.amount)
        }
    };

    Ok(Json(settle(&state, &challenge_id, result).await?))
}

async fn settle(
    state: &AppState,
    challenge_id: &str,
    result: ChallengeResult,
) -> ApiResult<SettleResponse> {
    let payout = state
        .wallet
        .process_payout(challenge_id, result.success)
        .await?;
    state.stakes.write().await.remove(challenge_id);

    let balance = state.wallet.balance().await;
    state.ws_hub.publish(WsEvent::balance(balance)).await;

    Ok(SettleResponse {
        result,
        payout,
        balance,
    })
}

/// GET /api/v1/pool/stats
pub async fn pool_stats() -> Json<PoolResponse> {
    Json(PoolResponse {
        stats: PoolStats::default(),
        min_stake: MIN_STAKE,
        max_stake: MAX_STAKE,
        payout_multiplier: PAYOUT_MULTIPLIER,
        duration_presets: DURATION_PRESETS.to_vec(),
    })
}
