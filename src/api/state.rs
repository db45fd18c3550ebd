//! Application State
//!
//! Everything the handlers share: the generated catalogue, the logged-in
//! user's session, the feed, the simulated wallet and the live hub.
//! Wrapped in Arc and handed to every handler.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::challenges::ChallengeBoard;
use crate::config::Config;
use crate::domain::{Activity, ActivityKind, Challenge, User};
use crate::mock::MockDataset;
use crate::session::UserSession;
use crate::social::{AchievementProgress, ActivityFeed};
use crate::staking::ActiveChallenge;
use crate::wallet::{CryptoWallet, StakeLedger, WalletConnection, WalletResult};
use crate::websocket::{ConnectionHub, HubConfig, WsEvent};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub start_time: Instant,
    /// Earliest join date among users, the reference for early adopters
    pub launched_at: Option<DateTime<Utc>>,
    /// Every user except the logged-in one, whose record lives in `session`
    pub users: Arc<RwLock<Vec<User>>>,
    pub board: Arc<RwLock<ChallengeBoard>>,
    pub session: Arc<RwLock<UserSession>>,
    pub feed: Arc<RwLock<ActivityFeed>>,
    /// Simulated wallet connection (the gate for acting as the user)
    pub connection: Arc<WalletConnection>,
    /// Token wallet that holds stakes
    pub wallet: Arc<CryptoWallet>,
    /// Running countdowns keyed by challenge id
    pub stakes: Arc<RwLock<HashMap<String, ActiveChallenge>>>,
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Generate the dataset from the configured seed and open the stake ledger
    pub fn new(config: Config) -> WalletResult<Self> {
        let ledger = match config.storage.ledger_path() {
            Some(path) => StakeLedger::load(path)?,
            None => StakeLedger::in_memory(),
        };
        let dataset = MockDataset::generate(config.simulation.seed, Utc::now());
        Ok(Self::from_parts(config, dataset, ledger, Utc::now()))
    }

    /// The first generated user becomes the logged-in user
    pub fn from_parts(
        config: Config,
        dataset: MockDataset,
        ledger: StakeLedger,
        now: DateTime<Utc>,
    ) -> Self {
        let MockDataset {
            mut users,
            challenges,
            comments,
            activities,
        } = dataset;

        let launched_at = users.iter().map(|u| u.joined_at).min();
        let current = if users.is_empty() {
            placeholder_user(now)
        } else {
            users.remove(0)
        };
        let session = UserSession::seeded(current, now);

        tracing::info!(
            user = %session.current_user().username,
            users = users.len() + 1,
            challenges = challenges.len(),
            open_stakes = ledger.len(),
            "Application state ready"
        );

        Self {
            wallet: Arc::new(CryptoWallet::new(config.simulation.wallet_config(), ledger)),
            connection: Arc::new(WalletConnection::new(config.simulation.connect_delay())),
            config: Arc::new(config),
            start_time: Instant::now(),
            launched_at,
            users: Arc::new(RwLock::new(users)),
            board: Arc::new(RwLock::new(ChallengeBoard::with_comments(challenges, comments))),
            session: Arc::new(RwLock::new(session)),
            feed: Arc::new(RwLock::new(ActivityFeed::new(activities))),
            stakes: Arc::new(RwLock::new(HashMap::new())),
            ws_hub: Arc::new(ConnectionHub::new(HubConfig::default())),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }

    /// All users with the logged-in user's live record included
    pub async fn all_users(&self) -> Vec<User> {
        let session = self.session.read().await;
        let mut users = self.users.read().await.clone();
        users.insert(0, session.current_user().clone());
        for user in users.iter_mut() {
            user.is_following = Some(session.is_following(&user.id));
        }
        users
    }

    pub async fn current_user(&self) -> User {
        self.session.read().await.current_user().clone()
    }

    /// Figures for achievement checks that live outside the user record
    pub async fn achievement_progress(&self, user: &User) -> AchievementProgress {
        let board = self.board.read().await;
        AchievementProgress {
            photos_uploaded: board.photos_uploaded(&user.id),
            photo_votes: board.votes_received(&user.id),
            challenges_created: board.created_by_count(&user.username),
            launched_at: self.launched_at,
        }
    }

    /// Add a feed event by the current user and push it to live clients
    pub async fn record_activity(
        &self,
        kind: ActivityKind,
        challenge: Option<&Challenge>,
        amount: Option<f64>,
        description: String,
    ) -> Activity {
        let user = self.current_user().await;
        let activity = self.feed.write().await.record(
            kind,
            &user,
            challenge.map(|c| (c.id.as_str(), c.title.as_str())),
            amount,
            description,
            Utc::now(),
        );
        self.ws_hub.publish(WsEvent::activity(activity.clone())).await;
        activity
    }

    pub async fn publish_challenge(&self, challenge: Challenge) {
        self.ws_hub.publish(WsEvent::challenge(challenge)).await;
    }
}

fn placeholder_user(now: DateTime<Utc>) -> User {
    User {
        id: "1".to_string(),
        username: "GrassToucher".to_string(),
        address: crate::wallet::MOCK_ADDRESS.to_string(),
        avatar: crate::mock::catalog::AVATAR_URLS[0].to_string(),
        total_earned: 0.0,
        total_staked: 0.0,
        current_streak: 0,
        longest_streak: 0,
        success_rate: 0.0,
        rank: 1,
        achievements: Vec::new(),
        followers: 0,
        following: 0,
        is_verified: false,
        joined_at: now,
        completed_challenges: 0,
        failed_challenges: 0,
        is_following: None,
        notifications_enabled: true,
    }
}

#[cfg(test)]
impl AppState {
    /// Seed 42, no latency, memory-only ledger
    pub(crate) fn for_tests() -> Self {
        let mut config = Config::default();
        config.storage.persist_stakes = false;
        config.simulation = crate::config::SimulationConfig::instant();
        let now = Utc::now();
        Self::from_parts(config, MockDataset::generate(42, now), StakeLedger::in_memory(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_user_is_logged_in() {
        let state = AppState::for_tests();
        let users = state.all_users().await;
        assert_eq!(users.len(), crate::mock::USER_COUNT);
        assert_eq!(users[0].id, state.current_user().await.id);
        assert!(users.iter().all(|u| u.is_following == Some(false)));
        assert!(state.launched_at.is_some());
    }

    #[tokio::test]
    async fn test_record_activity_reaches_feed_and_hub() {
        let state = AppState::for_tests();
        let mut listener = state.ws_hub.subscribe_broadcast();
        let before = state.feed.read().await.len();

        let activity = state
            .record_activity(ActivityKind::ChallengeJoined, None, Some(5.0), "joined".to_string())
            .await;

        assert_eq!(state.feed.read().await.len(), before + 1);
        assert_eq!(state.feed.read().await.recent(1)[0].id, activity.id);
        assert_eq!(listener.recv().await.unwrap().topic, "activity");
    }
}
