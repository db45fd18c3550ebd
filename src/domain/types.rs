//! Core display records
//!
//! - `User`: identity, avatar and aggregate stats
//! - `Challenge`: a stakeable real-world challenge
//! - `ChallengePhoto`: proof photos attached to a challenge
//! - `UserChallenge`: the current user's participation in a challenge
//! - `Activity`: a denormalized feed event
//! - `Achievement` and `Comment`
//!
//! None of these carry invariants beyond what the owning module enforces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::currency::Currency;
use super::error::DomainError;

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Wallet address
    pub address: String,
    /// Avatar image URL
    pub avatar: String,
    pub total_earned: f64,
    pub total_staked: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Fraction of resolved challenges that succeeded (0.0 - 1.0)
    pub success_rate: f64,
    pub rank: u32,
    /// Achievement ids
    #[serde(default)]
    pub achievements: Vec<String>,
    pub followers: u32,
    pub following: u32,
    pub is_verified: bool,
    pub joined_at: DateTime<Utc>,
    pub completed_challenges: u32,
    #[serde(default)]
    pub failed_challenges: u32,
    /// Whether the current user follows this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
}

fn default_notifications() -> bool {
    true
}

impl User {
    /// Total number of resolved challenges
    pub fn resolved_challenges(&self) -> u32 {
        self.completed_challenges + self.failed_challenges
    }

    /// Recompute the success rate from the resolved counts
    pub fn recompute_success_rate(&mut self) {
        let resolved = self.resolved_challenges();
        self.success_rate = if resolved == 0 {
            0.0
        } else {
            self.completed_challenges as f64 / resolved as f64
        };
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }
}

/// Difficulty rating of a challenge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DomainError::InvalidInput(format!("unknown difficulty '{}'", other))),
        }
    }
}

/// Category of challenge for browsing and display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCategory {
    Outdoor,
    Fitness,
    Detox,
    Social,
    Mindfulness,
    Adventure,
}

impl ChallengeCategory {
    pub fn all() -> &'static [ChallengeCategory] {
        &[
            ChallengeCategory::Outdoor,
            ChallengeCategory::Fitness,
            ChallengeCategory::Detox,
            ChallengeCategory::Social,
            ChallengeCategory::Mindfulness,
            ChallengeCategory::Adventure,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChallengeCategory::Outdoor => "Outdoor Adventure",
            ChallengeCategory::Fitness => "Fitness & Health",
            ChallengeCategory::Detox => "Digital Detox",
            ChallengeCategory::Social => "Social Connection",
            ChallengeCategory::Mindfulness => "Mindfulness",
            ChallengeCategory::Adventure => "Adventure Sports",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ChallengeCategory::Outdoor => "🏔️",
            ChallengeCategory::Fitness => "💪",
            ChallengeCategory::Detox => "📱",
            ChallengeCategory::Social => "👥",
            ChallengeCategory::Mindfulness => "🧘",
            ChallengeCategory::Adventure => "🏄",
        }
    }
}

impl std::fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChallengeCategory::Outdoor => "outdoor",
            ChallengeCategory::Fitness => "fitness",
            ChallengeCategory::Detox => "detox",
            ChallengeCategory::Social => "social",
            ChallengeCategory::Mindfulness => "mindfulness",
            ChallengeCategory::Adventure => "adventure",
        };
        f.write_str(s)
    }
}

impl FromStr for ChallengeCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChallengeCategory::all()
            .iter()
            .copied()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

/// A vote on a proof photo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhotoVote {
    Up,
    Down,
}

impl PhotoVote {
    /// Contribution of this vote to the photo's score
    pub fn weight(&self) -> i64 {
        match self {
            PhotoVote::Up => 1,
            PhotoVote::Down => -1,
        }
    }
}

/// A proof photo uploaded for a challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChallengePhoto {
    pub id: String,
    pub challenge_id: String,
    pub user_id: String,
    pub username: String,
    pub image_url: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
    pub votes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<PhotoVote>,
    pub is_verified: bool,
}

/// A stakeable challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub stake_amount: f64,
    pub stake_currency: Currency,
    /// Display duration, e.g. "24h"
    pub duration: String,
    pub duration_hours: u32,
    pub participants: u32,
    pub completed: u32,
    pub total_pot: f64,
    pub created_by: String,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub category: ChallengeCategory,
    pub difficulty: Difficulty,
    pub is_active: bool,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub photos: Vec<ChallengePhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Challenge {
    /// Fraction of participants who completed (0 when nobody joined)
    pub fn success_ratio(&self) -> f64 {
        if self.participants == 0 {
            0.0
        } else {
            self.completed as f64 / self.participants as f64
        }
    }

    /// Whether the participant cap has been reached
    pub fn is_full(&self) -> bool {
        self.max_participants
            .map(|max| self.participants >= max)
            .unwrap_or(false)
    }

    /// Recompute `is_active` against the given clock
    pub fn refresh_activity(&mut self, now: DateTime<Utc>) {
        self.is_active = self.ends_at > now;
    }
}

/// Status of the current user's participation in a challenge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    Active,
    Completed,
    Failed,
    PendingVerification,
}

impl ChallengeStatus {
    /// Whether the challenge still holds the user's stake
    pub fn is_open(&self) -> bool {
        matches!(self, ChallengeStatus::Active | ChallengeStatus::PendingVerification)
    }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Completed => "completed",
            ChallengeStatus::Failed => "failed",
            ChallengeStatus::PendingVerification => "pending_verification",
        };
        f.write_str(s)
    }
}

impl FromStr for ChallengeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ChallengeStatus::Active),
            "completed" => Ok(ChallengeStatus::Completed),
            "failed" => Ok(ChallengeStatus::Failed),
            "pending_verification" => Ok(ChallengeStatus::PendingVerification),
            other => Err(DomainError::InvalidInput(format!("unknown status '{}'", other))),
        }
    }
}

/// Join record linking the current user to a challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserChallenge {
    pub challenge_id: String,
    pub status: ChallengeStatus,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub stake_amount: f64,
    pub stake_currency: Currency,
    pub photo_submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout: Option<f64>,
}

impl UserChallenge {
    /// A freshly joined, active record
    pub fn new(
        challenge_id: impl Into<String>,
        stake_amount: f64,
        stake_currency: Currency,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            challenge_id: challenge_id.into(),
            status: ChallengeStatus::Active,
            joined_at: now,
            completed_at: None,
            stake_amount,
            stake_currency,
            photo_submitted: false,
            photo_id: None,
            payout: None,
        }
    }
}

/// Kind of feed event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ChallengeCreated,
    ChallengeJoined,
    ChallengeCompleted,
    PayoutReceived,
    AchievementUnlocked,
}

impl ActivityKind {
    pub fn all() -> &'static [ActivityKind] {
        &[
            ActivityKind::ChallengeCreated,
            ActivityKind::ChallengeJoined,
            ActivityKind::ChallengeCompleted,
            ActivityKind::PayoutReceived,
            ActivityKind::AchievementUnlocked,
        ]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::ChallengeCreated => "✨",
            ActivityKind::ChallengeJoined => "🎯",
            ActivityKind::ChallengeCompleted => "✅",
            ActivityKind::PayoutReceived => "💰",
            ActivityKind::AchievementUnlocked => "🏆",
        }
    }
}

/// A denormalized feed event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Username of the actor
    pub user: String,
    pub user_avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

/// Rarity tier of an achievement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// An achievement badge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// A comment on a challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub challenge_id: String,
    pub user_id: String,
    pub username: String,
    pub user_avatar: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub is_liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_challenge() -> Challenge {
        let now = Utc::now();
        Challenge {
            id: "1".to_string(),
            title: "Forest Bathing Session".to_string(),
            description: "Spend an hour among trees".to_string(),
            stake_amount: 10.0,
            stake_currency: Currency::Usdc,
            duration: "2h".to_string(),
            duration_hours: 2,
            participants: 10,
            completed: 4,
            total_pot: 100.0,
            created_by: "alice".to_string(),
            started_at: now - Duration::hours(1),
            ends_at: now + Duration::hours(1),
            category: ChallengeCategory::Mindfulness,
            difficulty: Difficulty::Easy,
            is_active: true,
            rules: vec![],
            photos: vec![],
            max_participants: Some(10),
            tags: vec![],
        }
    }

    #[test]
    fn test_challenge_helpers() {
        let mut challenge = sample_challenge();
        assert!((challenge.success_ratio() - 0.4).abs() < f64::EPSILON);
        assert!(challenge.is_full());

        challenge.refresh_activity(challenge.ends_at + Duration::seconds(1));
        assert!(!challenge.is_active);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ChallengeStatus::PendingVerification).unwrap();
        assert_eq!(json, "\"pending_verification\"");
        assert!(ChallengeStatus::PendingVerification.is_open());
        assert!(!ChallengeStatus::Failed.is_open());
    }

    #[test]
    fn test_activity_kind_serializes_as_type() {
        let activity = Activity {
            id: "1".to_string(),
            kind: ActivityKind::PayoutReceived,
            user: "alice".to_string(),
            user_avatar: String::new(),
            challenge: None,
            challenge_title: None,
            amount: Some(12.0),
            timestamp: Utc::now(),
            description: "received".to_string(),
        };
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "payout_received");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "Detox".parse::<ChallengeCategory>().unwrap(),
            ChallengeCategory::Detox
        );
        assert!("cooking".parse::<ChallengeCategory>().is_err());
    }
}
