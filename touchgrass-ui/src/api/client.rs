//! HTTP API Client
//!
//! Functions for talking to the Touch Grass REST API.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::*;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8090/api/v1";

const API_URL_KEY: &str = "touchgrass_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(API_URL_KEY, url.trim_end_matches('/'));
    }
}

/// Health endpoints live beside `/api/v1`, not under it
fn server_root(api_base: &str) -> &str {
    api_base.strip_suffix("/api/v1").unwrap_or(api_base)
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ErrorBody>().await {
            Ok(body) if body.error.code == "WALLET_NOT_CONNECTED" => {
                "Connect your wallet first".to_string()
            }
            Ok(body) => body.error.message,
            Err(_) => format!("Request failed ({})", status),
        });
    }
    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = Request::get(&format!("{}{}", get_api_base(), path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

async fn send<T: DeserializeOwned>(
    builder: RequestBuilder,
    body: Option<&impl Serialize>,
) -> Result<T, String> {
    let response = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| format!("Request build error: {}", e))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

async fn post<T: DeserializeOwned>(path: &str, body: Option<&impl Serialize>) -> Result<T, String> {
    send(Request::post(&format!("{}{}", get_api_base(), path)), body).await
}

const NO_BODY: Option<&()> = None;

// ============ Server ============

pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();
    let response = Request::get(&format!("{}/health", server_root(&api_base)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    read(response).await
}

// ============ Challenges ============

/// `query` is appended as is, e.g. `active=true&category=outdoor`
pub async fn fetch_challenges(query: &str) -> Result<Vec<Challenge>, String> {
    if query.is_empty() {
        get("/challenges").await
    } else {
        get(&format!("/challenges?{}", query)).await
    }
}

pub async fn fetch_challenge(id: &str) -> Result<ChallengeDetail, String> {
    get(&format!("/challenges/{}", id)).await
}

pub async fn create_challenge(form: &NewChallenge) -> Result<Challenge, String> {
    post("/challenges", Some(form)).await
}

pub async fn join_challenge(id: &str) -> Result<UserChallenge, String> {
    post(&format!("/challenges/{}/join", id), NO_BODY).await
}

pub async fn complete_challenge(id: &str) -> Result<UserChallenge, String> {
    post(&format!("/challenges/{}/complete", id), NO_BODY).await
}

pub async fn verify_challenge(id: &str) -> Result<Verification, String> {
    post(&format!("/challenges/{}/verify", id), NO_BODY).await
}

pub async fn upload_photo(id: &str, image_url: &str, description: &str) -> Result<ChallengePhoto, String> {
    let body = serde_json::json!({ "image_url": image_url, "description": description });
    post(&format!("/challenges/{}/photos", id), Some(&body)).await
}

/// `vote` is "up" or "down"; repeating a vote withdraws it
pub async fn vote_photo(photo_id: &str, vote: &str) -> Result<ChallengePhoto, String> {
    let body = serde_json::json!({ "vote": vote });
    post(&format!("/photos/{}/vote", photo_id), Some(&body)).await
}

pub async fn fetch_comments(id: &str) -> Result<Vec<Comment>, String> {
    get(&format!("/challenges/{}/comments", id)).await
}

pub async fn add_comment(id: &str, content: &str) -> Result<Comment, String> {
    let body = serde_json::json!({ "content": content });
    post(&format!("/challenges/{}/comments", id), Some(&body)).await
}

// ============ Current user ============

pub async fn fetch_me() -> Result<MeResponse, String> {
    get("/me").await
}

pub async fn fetch_my_challenges(status: &str) -> Result<Vec<UserChallenge>, String> {
    get(&format!("/me/challenges?status={}", status)).await
}

pub async fn update_settings(update: &SettingsUpdate) -> Result<User, String> {
    send(
        Request::patch(&format!("{}/me/settings", get_api_base())),
        Some(update),
    )
    .await
}

// ============ Social ============

pub async fn fetch_profile(username: &str) -> Result<ProfileView, String> {
    get(&format!("/users/{}", username)).await
}

pub async fn follow(user_id: &str, follow: bool) -> Result<serde_json::Value, String> {
    let url = format!("{}/users/{}/follow", get_api_base(), user_id);
    let builder = if follow {
        Request::post(&url)
    } else {
        Request::delete(&url)
    };
    send(builder, NO_BODY).await
}

pub async fn fetch_leaderboard(metric: &str, period: &str, limit: usize) -> Result<LeaderboardResponse, String> {
    get(&format!(
        "/leaderboard?metric={}&period={}&limit={}",
        metric, period, limit
    ))
    .await
}

pub async fn fetch_activities(limit: usize) -> Result<Vec<Activity>, String> {
    get(&format!("/activities?limit={}", limit)).await
}

// ============ Wallet ============

pub async fn fetch_wallet() -> Result<WalletInfo, String> {
    get("/wallet").await
}

pub async fn connect_wallet(provider: &str) -> Result<WalletInfo, String> {
    let body = serde_json::json!({ "provider": provider });
    post("/wallet/connect", Some(&body)).await
}

pub async fn disconnect_wallet() -> Result<WalletInfo, String> {
    post("/wallet/disconnect", NO_BODY).await
}

// ============ Stakes ============

pub async fn create_stake(challenge_id: &str, amount: f64, duration_minutes: u32) -> Result<StakeCreated, String> {
    let body = serde_json::json!({
        "challenge_id": challenge_id,
        "amount": amount,
        "duration_minutes": duration_minutes,
    });
    post("/stakes", Some(&body)).await
}

pub async fn fetch_stake(challenge_id: &str) -> Result<StakeView, String> {
    get(&format!("/stakes/{}", challenge_id)).await
}

pub async fn attach_proof(challenge_id: &str, photo_url: &str) -> Result<StakeView, String> {
    let body = serde_json::json!({ "photo_url": photo_url });
    post(&format!("/stakes/{}/photo", challenge_id), Some(&body)).await
}

pub async fn submit_proof(challenge_id: &str) -> Result<SettleResponse, String> {
    post(&format!("/stakes/{}/submit", challenge_id), NO_BODY).await
}

pub async fn quit_stake(challenge_id: &str) -> Result<SettleResponse, String> {
    post(&format!("/stakes/{}/quit", challenge_id), NO_BODY).await
}

pub async fn fetch_pool() -> Result<PoolResponse, String> {
    get("/pool/stats").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_root_strips_api_prefix() {
        assert_eq!(server_root("http://localhost:8090/api/v1"), "http://localhost:8090");
        assert_eq!(server_root("http://example.com"), "http://example.com");
    }
}
