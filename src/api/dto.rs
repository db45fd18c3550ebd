//! Data Transfer Objects
//!
//! Request and response bodies of the API endpoints. Responses also derive
//! `Deserialize` so the CLI can read them back.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Achievement, Challenge, ChallengeStatus, Currency, PhotoVote, User, UserChallenge,
};
use crate::social::{LeaderboardEntry, LeaderboardMetric, LeaderboardSummary, TimePeriod};
use crate::staking::{ActiveChallenge, ChallengeResult, PoolStats, Urgency};
use crate::wallet::{PayoutResult, StakeTransaction, WalletProvider};

// ============================================
// CHALLENGE DTOs
// ============================================

/// Challenge detail with the current user's participation
#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeDetail {
    pub challenge: Challenge,
    pub time_remaining: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation: Option<UserChallenge>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoUploadRequest {
    pub image_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoteRequest {
    pub vote: PhotoVote,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Joining defaults to the challenge's own stake and currency
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub stake_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<Currency>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CompleteRequest {
    #[serde(default)]
    pub photo_id: Option<String>,
}

// ============================================
// CURRENT USER DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: User,
    pub total_active_stake: f64,
    pub active_challenges: usize,
    pub completed_challenges: usize,
    pub wallet_connected: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MyChallengesQuery {
    #[serde(default)]
    pub status: Option<ChallengeStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MyAchievementsResponse {
    pub unlocked: Vec<Achievement>,
    pub locked: Vec<Achievement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowResponse {
    pub user_id: String,
    pub following: bool,
    /// False when the request repeated the current state
    pub changed: bool,
    pub following_count: u32,
}

// ============================================
// SOCIAL DTOs
// ============================================

/// Default number of leaderboard rows
pub const LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub metric: Option<LeaderboardMetric>,
    #[serde(default)]
    pub period: Option<TimePeriod>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub metric: LeaderboardMetric,
    pub metric_label: String,
    pub period: TimePeriod,
    pub period_label: String,
    pub entries: Vec<LeaderboardEntry>,
    pub summary: LeaderboardSummary,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    /// Only events by this username
    #[serde(default)]
    pub user: Option<String>,
}

// ============================================
// WALLET DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub provider: WalletProvider,
}

/// Connection state plus the formatted figures the header shows
#[derive(Debug, Serialize, Deserialize)]
pub struct WalletResponse {
    pub is_connected: bool,
    pub is_connecting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_address: Option<String>,
    pub balances: Vec<BalanceLine>,
    pub total_usd: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceLine {
    pub currency: Currency,
    pub amount: f64,
    pub display: String,
    pub usd: String,
}

// ============================================
// STAKE DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct StakeRequest {
    pub challenge_id: String,
    pub amount: f64,
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StakeBalanceResponse {
    pub balance: f64,
    pub open_stakes: Vec<OpenStake>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OpenStake {
    pub challenge_id: String,
    pub transaction: StakeTransaction,
}

/// A running stake as the countdown screen shows it
#[derive(Debug, Serialize, Deserialize)]
pub struct StakeView {
    pub stake: ActiveChallenge,
    pub remaining_seconds: i64,
    pub countdown: String,
    pub urgency: Urgency,
    pub potential_payout: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StakeCreatedResponse {
    #[serde(flatten)]
    pub view: StakeView,
    pub transaction: StakeTransaction,
    pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProofPhotoRequest {
    pub photo_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettleResponse {
    pub result: ChallengeResult,
    pub payout: PayoutResult,
    pub balance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PoolResponse {
    pub stats: PoolStats,
    pub min_stake: f64,
    pub max_stake: f64,
    pub payout_multiplier: f64,
    pub duration_presets: Vec<u32>,
}

// ============================================
// HEALTH DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub challenges: usize,
    pub users: usize,
    pub open_stakes: usize,
    pub ws_connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
