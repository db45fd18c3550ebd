//! Touch Grass REST API
//!
//! HTTP API layer built with Axum. It stands in for the client-side
//! providers of the web app: one logged-in mock user, a simulated wallet
//! and the generated catalogue.
//!
//! # Endpoints
//!
//! ## Challenges
//! - `GET /api/v1/challenges` - List (`active`, `category`, `difficulty`, `creator`, `limit`)
//! - `POST /api/v1/challenges` - Create from the form
//! - `GET /api/v1/challenges/:id` - Detail with the user's participation
//! - `GET|POST /api/v1/challenges/:id/photos` - Proof photos
//! - `POST /api/v1/photos/:id/vote` - Up/down vote, repeat to withdraw
//! - `GET|POST /api/v1/challenges/:id/comments` - Comments
//! - `POST /api/v1/comments/:id/like` - Toggle a like
//! - `POST /api/v1/challenges/:id/{join,complete,verify,forfeit}` - Participation
//!
//! ## Current user
//! - `GET /api/v1/me`, `PATCH /api/v1/me/settings`
//! - `GET /api/v1/me/challenges`, `GET /api/v1/me/achievements`
//!
//! ## Social
//! - `GET /api/v1/users/:user` - Profile by username or id
//! - `POST|DELETE /api/v1/users/:user/follow` - Follow by user id
//! - `GET /api/v1/leaderboard`, `GET /api/v1/activities`, `GET /api/v1/achievements`
//!
//! ## Wallet and stakes
//! - `GET /api/v1/wallet`, `POST /api/v1/wallet/connect`, `POST /api/v1/wallet/disconnect`
//! - `GET /api/v1/stakes/balance`, `POST /api/v1/stakes`, `GET /api/v1/stakes/:challenge_id`
//! - `POST /api/v1/stakes/:challenge_id/{photo,submit,quit}`
//! - `GET /api/v1/pool/stats`
//!
//! ## Health
//! - `GET /health/live`, `GET /health/ready`, `GET /health`
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Live feed, see [`crate::websocket`]
//!
//! Routes acting as the user answer 403 `WALLET_NOT_CONNECTED` until a
//! wallet is connected.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Photo uploads arrive as data URLs
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    use routes::{challenges, me, social, stakes, users, wallet};

    let api_routes = Router::new()
        // Challenges
        .route(
            "/challenges",
            get(challenges::list_challenges).post(challenges::create_challenge),
        )
        .route("/challenges/:id", get(challenges::get_challenge))
        .route(
            "/challenges/:id/photos",
            get(challenges::list_photos).post(challenges::upload_photo),
        )
        .route(
            "/challenges/:id/comments",
            get(challenges::list_comments).post(challenges::add_comment),
        )
        .route("/challenges/:id/join", post(challenges::join_challenge))
        .route("/challenges/:id/complete", post(challenges::complete_challenge))
        .route("/challenges/:id/verify", post(challenges::verify_challenge))
        .route("/challenges/:id/forfeit", post(challenges::forfeit_challenge))
        .route("/photos/:id/vote", post(challenges::vote_photo))
        .route("/comments/:id/like", post(challenges::toggle_comment_like))
        // Current user
        .route("/me", get(me::get_me))
        .route("/me/settings", patch(me::update_settings))
        .route("/me/challenges", get(me::my_challenges))
        .route("/me/achievements", get(me::my_achievements))
        // Social
        .route("/users/:user", get(users::get_profile))
        .route(
            "/users/:user/follow",
            post(users::follow_user).delete(users::unfollow_user),
        )
        .route("/leaderboard", get(social::leaderboard))
        .route("/activities", get(social::activities))
        .route("/achievements", get(social::achievements))
        // Wallet
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/connect", post(wallet::connect))
        .route("/wallet/disconnect", post(wallet::disconnect))
        // Stakes
        .route("/stakes", post(stakes::create_stake))
        .route("/stakes/balance", get(stakes::balance))
        .route("/stakes/:challenge_id", get(stakes::get_stake))
        .route("/stakes/:challenge_id/photo", post(stakes::attach_photo))
        .route("/stakes/:challenge_id/submit", post(stakes::submit_proof))
        .route("/stakes/:challenge_id/quit", post(stakes::quit))
        .route("/pool/stats", get(stakes::pool_stats))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // WebSocket
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.api.cors_origins);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(allowed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server and run until Ctrl+C or SIGTERM
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Touch Grass API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Touch Grass API shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletProvider;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Duration;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, AppState) {
        let state = AppState::for_tests();
        (build_router(state.clone()), state)
    }

    async fn connected_app() -> (Router, AppState) {
        let (app, state) = create_test_app();
        state.connection.connect(WalletProvider::Metamask).await.unwrap();
        (app, state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// An active challenge with room, other than the seeded open one
    async fn joinable_challenge(app: &Router) -> String {
        let (_, list) = call(app, "GET", "/api/v1/challenges?active=true", None).await;
        list.as_array()
            .unwrap()
            .iter()
            .filter(|c| c["id"] != "1")
            .find(|c| match c["max_participants"].as_u64() {
                Some(max) => max > c["participants"].as_u64().unwrap(),
                None => true,
            })
            .map(|c| c["id"].as_str().unwrap().to_string())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _) = create_test_app();
        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_list_challenges_with_filter() {
        let (app, _) = create_test_app();

        let (status, all) = call(&app, "GET", "/api/v1/challenges", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!all.as_array().unwrap().is_empty());

        let (status, outdoor) =
            call(&app, "GET", "/api/v1/challenges?category=outdoor&limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let outdoor = outdoor.as_array().unwrap();
        assert!(outdoor.len() <= 2);
        assert!(outdoor.iter().all(|c| c["category"] == "outdoor"));
    }

    #[tokio::test]
    async fn test_unknown_challenge_is_404() {
        let (app, _) = create_test_app();
        let (status, body) = call(&app, "GET", "/api/v1/challenges/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "CHALLENGE_NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_user_routes_need_wallet() {
        let (app, _) = create_test_app();

        let (status, body) = call(&app, "GET", "/api/v1/me", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "WALLET_NOT_CONNECTED");

        let (status, _) = call(&app, "POST", "/api/v1/challenges/1/join", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Browsing stays open
        let (status, _) = call(&app, "GET", "/api/v1/leaderboard", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wallet_connect_disconnect() {
        let (app, _) = create_test_app();

        let (status, wallet) = call(
            &app,
            "POST",
            "/api/v1/wallet/connect",
            Some(json!({"provider": "metamask"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(wallet["is_connected"], true);
        assert_eq!(wallet["short_address"], "0x1234...7890");

        let (status, _) = call(&app, "GET", "/api/v1/me", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, wallet) = call(&app, "POST", "/api/v1/wallet/disconnect", None).await;
        assert_eq!(wallet["is_connected"], false);
    }

    #[tokio::test]
    async fn test_join_twice_conflicts() {
        let (app, _) = connected_app().await;
        let id = joinable_challenge(&app).await;

        let (status, record) =
            call(&app, "POST", &format!("/api/v1/challenges/{}/join", id), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(record["status"], "active");

        let (status, body) =
            call(&app, "POST", &format!("/api/v1/challenges/{}/join", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "ALREADY_JOINED");

        let (_, feed) = call(&app, "GET", "/api/v1/activities?limit=1", None).await;
        assert_eq!(feed[0]["type"], "challenge_joined");
        assert_eq!(feed[0]["challenge"], id.as_str());
    }

    #[tokio::test]
    async fn test_complete_then_verify_seeded_challenge() {
        let (app, _) = connected_app().await;

        let (status, record) = call(
            &app,
            "POST",
            "/api/v1/challenges/1/complete",
            Some(json!({"photo_id": "photo_1_0"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["status"], "pending_verification");

        let (status, verification) =
            call(&app, "POST", "/api/v1/challenges/1/verify", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(verification["record"]["status"], "completed");
        assert_eq!(verification["record"]["payout"], 12.0);

        let (_, mine) = call(&app, "GET", "/api/v1/me/challenges?status=completed", None).await;
        assert_eq!(mine.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_challenge() {
        let (app, _) = connected_app().await;
        let form = json!({
            "title": "Sunrise Walk",
            "description": "Watch the sun come up outside",
            "stake_amount": 5.0,
            "duration_hours": 2,
            "rules": "Be outside before sunrise\n\nPhoto of the horizon"
        });

        let (status, created) = call(&app, "POST", "/api/v1/challenges", Some(form)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["participants"], 0);
        assert_eq!(created["duration"], "2 hours");
        assert_eq!(created["rules"].as_array().unwrap().len(), 2);

        let (_, list) = call(&app, "GET", "/api/v1/challenges?limit=1", None).await;
        assert_eq!(list[0]["id"], created["id"]);

        let bad = json!({"title": "", "description": "x", "stake_amount": 1.0, "duration_hours": 1});
        let (status, _) = call(&app, "POST", "/api/v1/challenges", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rename_keeps_created_challenges() {
        let (app, state) = connected_app().await;
        let form = json!({
            "title": "Lunch outside",
            "description": "Eat lunch on the grass",
            "stake_amount": 2.0,
            "duration_hours": 1
        });
        let (_, created) = call(&app, "POST", "/api/v1/challenges", Some(form)).await;
        let me = state.current_user().await;
        let owned = state.achievement_progress(&me).await.challenges_created;
        assert!(owned >= 1);

        let (status, _) = call(
            &app,
            "PATCH",
            "/api/v1/me/settings",
            Some(json!({"username": "grass_toucher"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let me = state.current_user().await;
        assert_eq!(me.username, "grass_toucher");
        assert_eq!(state.achievement_progress(&me).await.challenges_created, owned);

        let (_, profile) = call(&app, "GET", "/api/v1/users/grass_toucher", None).await;
        let created_ids: Vec<&Value> = profile["created_challenges"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| &c["id"])
            .collect();
        assert!(created_ids.contains(&&created["id"]));
    }

    #[tokio::test]
    async fn test_overlong_challenge_is_bad_request() {
        let (app, _) = connected_app().await;
        let form = json!({
            "title": "Walk",
            "description": "Go outside",
            "stake_amount": 5.0,
            "duration_hours": 4_000_000_000u32
        });
        let (status, body) = call(&app, "POST", "/api/v1/challenges", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["code"].is_string());
    }

    #[tokio::test]
    async fn test_stake_flow_submit() {
        let (app, state) = connected_app().await;

        let (status, created) = call(
            &app,
            "POST",
            "/api/v1/stakes",
            Some(json!({"challenge_id": "1", "amount": 10.0, "duration_minutes": 15})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["balance"], 90.0);
        assert_eq!(created["potential_payout"], 12.0);

        // Photo only once the timer is up
        let photo = json!({"photo_url": "data:image/png;base64,AAAA"});
        let (status, _) = call(&app, "POST", "/api/v1/stakes/1/photo", Some(photo.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(&app, "POST", "/api/v1/stakes/1/submit", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        if let Some(stake) = state.stakes.write().await.get_mut("1") {
            stake.started_at = stake.started_at - Duration::minutes(20);
        }

        let (status, view) = call(&app, "POST", "/api/v1/stakes/1/photo", Some(photo)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["urgency"], "time_up");

        let (status, settled) = call(&app, "POST", "/api/v1/stakes/1/submit", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settled["result"]["success"], true);
        assert_eq!(settled["payout"]["amount"], 12.0);
        assert_eq!(settled["balance"], 102.0);

        let (status, _) = call(&app, "GET", "/api/v1/stakes/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stake_quit_and_validation() {
        let (app, _) = connected_app().await;

        let (status, body) = call(
            &app,
            "POST",
            "/api/v1/stakes",
            Some(json!({"challenge_id": "2", "amount": 60.0, "duration_minutes": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Maximum stake is $50");

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/stakes",
            Some(json!({"challenge_id": "missing", "amount": 5.0, "duration_minutes": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let stake = json!({"challenge_id": "2", "amount": 20.0, "duration_minutes": 30});
        let (status, _) = call(&app, "POST", "/api/v1/stakes", Some(stake.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = call(&app, "POST", "/api/v1/stakes", Some(stake)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "STAKE_ALREADY_OPEN");

        let (_, balance) = call(&app, "GET", "/api/v1/stakes/balance", None).await;
        assert_eq!(balance["balance"], 80.0);
        assert_eq!(balance["open_stakes"].as_array().unwrap().len(), 1);

        let (status, settled) = call(&app, "POST", "/api/v1/stakes/2/quit", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settled["result"]["success"], false);
        assert_eq!(settled["payout"]["amount"], 0.0);
        assert_eq!(settled["balance"], 80.0);

        let (status, _) = call(&app, "POST", "/api/v1/stakes/2/quit", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_leaderboard_and_profiles() {
        let (app, state) = connected_app().await;

        let (status, board) =
            call(&app, "GET", "/api/v1/leaderboard?metric=streaks&period=weekly&limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        let entries = board["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["rank"], 1);
        assert_eq!(board["period_label"], "This Week");

        let other = state.users.read().await[0].clone();
        let (status, profile) =
            call(&app, "GET", &format!("/api/v1/users/{}", other.username), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["user"]["id"], other.id.as_str());

        let (status, _) = call(&app, "GET", "/api/v1/users/NoSuchPerson", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_follow_rules() {
        let (app, state) = connected_app().await;
        let other = state.users.read().await[0].id.clone();
        let me = state.current_user().await.id;

        let (status, body) =
            call(&app, "POST", &format!("/api/v1/users/{}/follow", other), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["following"], true);
        assert_eq!(body["changed"], true);

        let (_, body) = call(&app, "POST", &format!("/api/v1/users/{}/follow", other), None).await;
        assert_eq!(body["changed"], false);

        let (status, _) = call(&app, "POST", &format!("/api/v1/users/{}/follow", me), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, "POST", "/api/v1/users/9999/follow", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) =
            call(&app, "DELETE", &format!("/api/v1/users/{}/follow", other), None).await;
        assert_eq!(body["following"], false);
    }

    #[tokio::test]
    async fn test_photo_vote_toggles() {
        let (app, _) = create_test_app();
        let (_, photos) = call(&app, "GET", "/api/v1/challenges/1/photos", None).await;
        let photo = &photos[0];
        let votes = photo["votes"].as_i64().unwrap();
        let uri = format!("/api/v1/photos/{}/vote", photo["id"].as_str().unwrap());

        let (_, voted) = call(&app, "POST", &uri, Some(json!({"vote": "up"}))).await;
        assert_eq!(voted["votes"].as_i64().unwrap(), votes + 1);

        let (_, switched) = call(&app, "POST", &uri, Some(json!({"vote": "down"}))).await;
        assert_eq!(switched["votes"].as_i64().unwrap(), votes - 1);

        let (_, withdrawn) = call(&app, "POST", &uri, Some(json!({"vote": "down"}))).await;
        assert_eq!(withdrawn["votes"].as_i64().unwrap(), votes);
    }
}
