//! Health Routes
//!
//! - GET /health/live - process is alive
//! - GET /health/ready - catalogue loaded, ready to serve
//! - GET /health - status with counts

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// 503 until the challenge catalogue holds something.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.board.read().await.is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let challenges = state.board.read().await.len();
    let users = state.users.read().await.len() + 1;
    let open_stakes = state.stakes.read().await.len();

    Json(HealthResponse {
        status: if challenges > 0 { "healthy" } else { "degraded" }.to_string(),
        challenges,
        users,
        open_stakes,
        ws_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_full_health_counts() {
        let state = Arc::new(AppState::for_tests());
        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.users, crate::mock::USER_COUNT);
        assert_eq!(health.open_stakes, 0);
    }
}
