//! Social Routes
//!
//! Leaderboards, the activity feed and the achievement catalogue.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ActivityQuery, LeaderboardQuery, LeaderboardResponse, LEADERBOARD_LIMIT};
use crate::api::state::AppState;
use crate::domain::{Achievement, Activity};
use crate::mock::achievement_catalog;
use crate::social::{rank_users, LeaderboardSummary, FEED_LIMIT};

/// GET /api/v1/leaderboard
///
/// `metric` picks the ranking; `period` only changes the label.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<LeaderboardResponse> {
    let metric = query.metric.unwrap_or_default();
    let period = query.period.unwrap_or_default();
    let users = state.all_users().await;

    Json(LeaderboardResponse {
        metric,
        metric_label: metric.display_name().to_string(),
        period,
        period_label: period.label().to_string(),
        entries: rank_users(&users, metric, query.limit.unwrap_or(LEADERBOARD_LIMIT)),
        summary: LeaderboardSummary::from_users(&users),
    })
}

/// GET /api/v1/activities
pub async fn activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivityQuery>,
) -> Json<Vec<Activity>> {
    let feed = state.feed.read().await;
    let limit = query.limit.unwrap_or(FEED_LIMIT);
    let events = match query.user {
        Some(user) => feed.by_user(&user).into_iter().take(limit).collect(),
        None => feed.recent(limit),
    };
    Json(events)
}

/// GET /api/v1/achievements
pub async fn achievements() -> Json<Vec<Achievement>> {
    Json(achievement_catalog())
}
