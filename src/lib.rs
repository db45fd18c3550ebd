//! # Touch Grass
//!
//! Accountability betting for going outside. Users stake tokens on
//! real-world challenges, prove completion with a photo, and are paid
//! `stake * 1.2` when they succeed. Everything runs against generated data
//! and a simulated wallet, so nothing here touches a chain.
//!
//! ## Modules
//!
//! - [`domain`]: Users, challenges, photos, activities and currencies
//! - [`staking`]: Stake rules and the countdown of a running stake
//! - [`wallet`]: Simulated wallet connection and the token wallet with its ledger
//! - [`mock`]: Seeded dataset generation and the achievement catalogue
//! - [`challenges`]: The challenge board and the creation form
//! - [`session`]: The logged-in user and their participation
//! - [`social`]: Leaderboards, the activity feed, achievements and profiles
//! - [`format`]: Display helpers for amounts, addresses and times
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live feed over WebSocket
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use touchgrass::staking::ActiveChallenge;
//! use touchgrass::wallet::{CryptoWallet, StakeLedger, WalletConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wallet = CryptoWallet::new(WalletConfig::default(), StakeLedger::in_memory());
//!
//!     // Stake 10 tokens on challenge "1" for half an hour
//!     let mut stake = ActiveChallenge::start("1", 10.0, 30, chrono::Utc::now())?;
//!     wallet.stake_tokens(10.0, "1").await?;
//!
//!     // Giving up settles the stake as a loss
//!     let result = stake.quit()?;
//!     let payout = wallet.process_payout("1", result.success).await?;
//!
//!     println!("Paid {} tokens, balance {}", payout.amount, wallet.balance().await);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod challenges;
pub mod config;
pub mod domain;
pub mod format;
pub mod mock;
pub mod session;
pub mod social;
pub mod staking;
pub mod wallet;
pub mod websocket;

// Re-export top-level types for convenience
pub use domain::{
    Achievement, Activity, ActivityKind, Challenge, ChallengeCategory, ChallengePhoto,
    ChallengeStatus, Comment, Currency, Difficulty, DomainError, DomainResult, PhotoVote, User,
    UserChallenge,
};

pub use staking::{ActiveChallenge, ChallengeResult, PoolStats, Urgency};

pub use wallet::{
    CryptoWallet, PayoutResult, StakeLedger, StakeTransaction, WalletConfig, WalletConnection,
    WalletError, WalletProvider, WalletResult, WalletState,
};

pub use mock::MockDataset;

pub use challenges::{ChallengeBoard, ChallengeFilter, ChallengeForm};

pub use session::{UserSession, Verification};

pub use social::{
    rank_users, ActivityFeed, LeaderboardEntry, LeaderboardMetric, ProfileView, TimePeriod,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{
    websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage, WsEvent,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SimulationConfig, StorageConfig};
