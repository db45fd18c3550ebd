//! Leaderboards
//!
//! Users ranked by one of four metrics. The time period is a display label;
//! every period ranks on the same all-time figures.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{DomainError, User};
use crate::format::{format_currency, format_number, format_percentage};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Earnings,
    Streaks,
    Success,
    Challenges,
}

impl LeaderboardMetric {
    pub fn all() -> &'static [LeaderboardMetric] {
        &[
            LeaderboardMetric::Earnings,
            LeaderboardMetric::Streaks,
            LeaderboardMetric::Success,
            LeaderboardMetric::Challenges,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeaderboardMetric::Earnings => "Total Earnings",
            LeaderboardMetric::Streaks => "Current Streaks",
            LeaderboardMetric::Success => "Success Rate",
            LeaderboardMetric::Challenges => "Challenges Completed",
        }
    }

    /// The user field this metric ranks on
    pub fn value_of(&self, user: &User) -> f64 {
        match self {
            LeaderboardMetric::Earnings => user.total_earned,
            LeaderboardMetric::Streaks => user.current_streak as f64,
            LeaderboardMetric::Success => user.success_rate,
            LeaderboardMetric::Challenges => user.completed_challenges as f64,
        }
    }
}

impl FromStr for LeaderboardMetric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "earnings" => Ok(LeaderboardMetric::Earnings),
            "streaks" => Ok(LeaderboardMetric::Streaks),
            "success" => Ok(LeaderboardMetric::Success),
            "challenges" => Ok(LeaderboardMetric::Challenges),
            other => Err(DomainError::UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimePeriod {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[default]
    #[serde(rename = "all-time")]
    AllTime,
}

impl TimePeriod {
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Daily => "Today",
            TimePeriod::Weekly => "This Week",
            TimePeriod::Monthly => "This Month",
            TimePeriod::AllTime => "All Time",
        }
    }
}

impl FromStr for TimePeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(TimePeriod::Daily),
            "weekly" => Ok(TimePeriod::Weekly),
            "monthly" => Ok(TimePeriod::Monthly),
            "all-time" | "all_time" | "alltime" => Ok(TimePeriod::AllTime),
            other => Err(DomainError::InvalidInput(format!("unknown period '{}'", other))),
        }
    }
}

/// Badge shown next to a rank
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "rank")]
pub enum RankBadge {
    Trophy,
    Medal,
    Award,
    Number(u32),
}

impl RankBadge {
    pub fn for_rank(rank: u32) -> Self {
        match rank {
            1 => RankBadge::Trophy,
            2 => RankBadge::Medal,
            3 => RankBadge::Award,
            n => RankBadge::Number(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RankBadge::Trophy => "🏆".to_string(),
            RankBadge::Medal => "🥈".to_string(),
            RankBadge::Award => "🥉".to_string(),
            RankBadge::Number(n) => format!("#{}", n),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub badge: RankBadge,
    pub user: User,
    pub value: f64,
    pub display_value: String,
}

/// Rank users descending by `metric`. Ties keep their input order.
pub fn rank_users(users: &[User], metric: LeaderboardMetric, limit: usize) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&User> = users.iter().collect();
    sorted.sort_by(|a, b| metric.value_of(b).total_cmp(&metric.value_of(a)));

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, user)| {
            let rank = i as u32 + 1;
            let value = metric.value_of(user);
            LeaderboardEntry {
                rank,
                badge: RankBadge::for_rank(rank),
                user: user.clone(),
                value,
                display_value: format_metric_value(metric, value),
            }
        })
        .collect()
}

pub fn format_metric_value(metric: LeaderboardMetric, value: f64) -> String {
    match metric {
        LeaderboardMetric::Earnings => format_currency(value, "USD"),
        LeaderboardMetric::Success => format_percentage(value),
        LeaderboardMetric::Streaks => format!("{} days", value),
        LeaderboardMetric::Challenges => format_number(value),
    }
}

/// Totals shown beside the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardSummary {
    pub total_users: usize,
    pub total_earned: f64,
    pub longest_streak: u32,
}

impl LeaderboardSummary {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total_users: users.len(),
            total_earned: users.iter().map(|u| u.total_earned).sum(),
            longest_streak: users.iter().map(|u| u.longest_streak).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;
    use chrono::Utc;

    #[test]
    fn test_rank_by_each_metric() {
        let data = MockDataset::generate(5, Utc::now());
        for metric in LeaderboardMetric::all() {
            let entries = rank_users(&data.users, *metric, 10);
            assert_eq!(entries.len(), 10);
            assert_eq!(entries[0].rank, 1);
            assert_eq!(entries[0].badge, RankBadge::Trophy);
            assert!(entries.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let data = MockDataset::generate(5, Utc::now());
        let mut users: Vec<User> = data.users.into_iter().take(3).collect();
        for user in &mut users {
            user.current_streak = 4;
        }
        let entries = rank_users(&users, LeaderboardMetric::Streaks, 10);
        let ids: Vec<_> = entries.iter().map(|e| e.user.id.clone()).collect();
        let expected: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
        assert_eq!(ids, expected);
        assert_eq!(entries[2].badge, RankBadge::Award);
    }

    #[test]
    fn test_format_metric_value() {
        assert_eq!(format_metric_value(LeaderboardMetric::Earnings, 1234.5), "$1,234.50");
        assert_eq!(format_metric_value(LeaderboardMetric::Success, 0.73), "73%");
        assert_eq!(format_metric_value(LeaderboardMetric::Streaks, 12.0), "12 days");
        assert_eq!(format_metric_value(LeaderboardMetric::Challenges, 1500.0), "1.5K");
    }

    #[test]
    fn test_parse_metric_and_period() {
        assert_eq!(
            "streaks".parse::<LeaderboardMetric>().unwrap(),
            LeaderboardMetric::Streaks
        );
        assert!(matches!(
            "karma".parse::<LeaderboardMetric>(),
            Err(DomainError::UnknownMetric(_))
        ));
        assert_eq!("all-time".parse::<TimePeriod>().unwrap(), TimePeriod::AllTime);
        assert_eq!(RankBadge::for_rank(7).label(), "#7");
    }
}
