//! Social features
//!
//! - **leaderboard**: ranking by earnings, streaks, success rate or completions
//! - **feed**: the activity feed
//! - **profile**: public profile pages
//! - **achievements**: unlock conditions

pub mod achievements;
pub mod feed;
pub mod leaderboard;
pub mod profile;

pub use achievements::{evaluate_achievements, held_by, unlock_new, AchievementProgress};
pub use feed::{ActivityFeed, FEED_LIMIT};
pub use leaderboard::{
    format_metric_value, rank_users, LeaderboardEntry, LeaderboardMetric, LeaderboardSummary,
    RankBadge, TimePeriod,
};
pub use profile::ProfileView;
