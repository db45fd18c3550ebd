//! Response types
//!
//! Mirrors of the JSON the Touch Grass API returns. Only the fields the
//! pages read are declared; anything else is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub address: String,
    pub avatar: String,
    pub total_earned: f64,
    pub total_staked: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub success_rate: f64,
    pub rank: u32,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub followers: u32,
    pub following: u32,
    pub is_verified: bool,
    pub joined_at: DateTime<Utc>,
    pub completed_challenges: u32,
    #[serde(default)]
    pub is_following: Option<bool>,
    #[serde(default = "yes")]
    pub notifications_enabled: bool,
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChallengePhoto {
    pub id: String,
    pub challenge_id: String,
    pub username: String,
    pub image_url: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
    pub votes: i64,
    #[serde(default)]
    pub user_vote: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub stake_amount: f64,
    pub stake_currency: String,
    pub duration: String,
    pub participants: u32,
    pub completed: u32,
    pub total_pot: f64,
    pub created_by: String,
    pub ends_at: DateTime<Utc>,
    pub category: String,
    pub difficulty: String,
    pub is_active: bool,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub photos: Vec<ChallengePhoto>,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserChallenge {
    pub challenge_id: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
    pub stake_amount: f64,
    pub stake_currency: String,
    pub photo_submitted: bool,
    #[serde(default)]
    pub payout: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChallengeDetail {
    pub challenge: Challenge,
    pub time_remaining: String,
    #[serde(default)]
    pub participation: Option<UserChallenge>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub user_avatar: String,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub challenge_title: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rarity: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: User,
    pub total_active_stake: f64,
    pub active_challenges: usize,
    pub completed_challenges: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileView {
    pub user: User,
    pub achievements: Vec<Achievement>,
    pub created_challenges: Vec<Challenge>,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BalanceLine {
    pub currency: String,
    pub amount: f64,
    pub display: String,
    pub usd: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WalletInfo {
    pub is_connected: bool,
    pub is_connecting: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub short_address: Option<String>,
    #[serde(default)]
    pub balances: Vec<BalanceLine>,
    pub total_usd: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user: User,
    pub value: f64,
    pub display_value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub metric_label: String,
    pub period_label: String,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verification {
    pub record: UserChallenge,
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StakeView {
    pub remaining_seconds: i64,
    pub countdown: String,
    pub urgency: String,
    pub potential_payout: f64,
    pub stake: ActiveStake,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActiveStake {
    pub challenge_id: String,
    pub stake_amount: f64,
    pub duration_minutes: u32,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakeCreated {
    #[serde(flatten)]
    pub view: StakeView,
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StakeResult {
    pub success: bool,
    pub stake: f64,
    pub payout: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payout {
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettleResponse {
    pub result: StakeResult,
    pub payout: Payout,
    pub balance: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PoolStats {
    pub total_active_stakes: f64,
    pub success_rate: f64,
    pub average_stake: f64,
    pub total_bonus_paid: f64,
    pub active_participants: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolResponse {
    pub stats: PoolStats,
    pub min_stake: f64,
    pub max_stake: f64,
    pub payout_multiplier: f64,
    pub duration_presets: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub challenges: usize,
    pub users: usize,
    pub uptime_seconds: u64,
}

/// Challenge creation form
#[derive(Debug, Clone, Serialize)]
pub struct NewChallenge {
    pub title: String,
    pub description: String,
    pub stake_amount: f64,
    pub duration_hours: u32,
    pub category: String,
    pub difficulty: String,
    pub rules: String,
}

/// Partial settings update
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
}

/// Error body of a failed request
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
