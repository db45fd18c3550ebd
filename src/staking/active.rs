//! A staked challenge in progress
//!
//! Tracks the countdown for one stake, the proof photo and the final outcome.
//! An outcome is set exactly once, either by submitting proof or by quitting.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{payout_for, validate_duration_minutes, validate_stake_amount};
use crate::domain::{DomainError, DomainResult};

/// Remaining time under which the countdown turns to a warning
pub const WARNING_THRESHOLD_SECS: i64 = 5 * 60;

/// How the countdown should be presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Warning,
    TimeUp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveChallenge {
    pub challenge_id: String,
    pub stake_amount: f64,
    pub duration_minutes: u32,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl ActiveChallenge {
    pub fn start(
        challenge_id: impl Into<String>,
        stake_amount: f64,
        duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_stake_amount(stake_amount)?;
        validate_duration_minutes(duration_minutes)?;

        Ok(Self {
            challenge_id: challenge_id.into(),
            stake_amount,
            duration_minutes,
            started_at: now,
            photo_url: None,
            outcome: None,
        })
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::minutes(self.duration_minutes as i64)
    }

    /// Time left on the clock, never negative
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        let left = self.ends_at() - now;
        if left < Duration::zero() {
            Duration::zero()
        } else {
            left
        }
    }

    pub fn is_time_up(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now) <= Duration::zero()
    }

    pub fn urgency(&self, now: DateTime<Utc>) -> Urgency {
        let remaining = self.remaining(now);
        if remaining <= Duration::zero() {
            Urgency::TimeUp
        } else if remaining.num_seconds() < WARNING_THRESHOLD_SECS {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// Attach (or replace) the proof photo. Only allowed once the timer ran out.
    pub fn attach_photo(&mut self, url: impl Into<String>, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_unresolved("attach a photo to")?;

        let url = url.into();
        if url.trim().is_empty() {
            return Err(DomainError::InvalidInput("photo URL is empty".to_string()));
        }
        if !self.is_time_up(now) {
            return Err(DomainError::InvalidTransition {
                from: "still running".to_string(),
                action: "attach a photo to".to_string(),
            });
        }

        self.photo_url = Some(url);
        Ok(())
    }

    /// Submit the attached photo as proof. Presence of a photo is the only check.
    pub fn submit_proof(&mut self) -> DomainResult<ChallengeResult> {
        self.ensure_unresolved("submit")?;
        if self.photo_url.is_none() {
            return Err(DomainError::PhotoRequired);
        }
        self.outcome = Some(Outcome::Succeeded);
        Ok(ChallengeResult::new(true, self.stake_amount))
    }

    /// Give up. The stake is lost.
    pub fn quit(&mut self) -> DomainResult<ChallengeResult> {
        self.ensure_unresolved("quit")?;
        self.outcome = Some(Outcome::Failed);
        Ok(ChallengeResult::new(false, self.stake_amount))
    }

    fn ensure_unresolved(&self, action: &str) -> DomainResult<()> {
        match self.outcome {
            None => Ok(()),
            Some(outcome) => Err(DomainError::InvalidTransition {
                from: match outcome {
                    Outcome::Succeeded => "completed".to_string(),
                    Outcome::Failed => "failed".to_string(),
                },
                action: action.to_string(),
            }),
        }
    }
}

/// "H:MM:SS" with at least an hour left, "M:SS" otherwise
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// What the result screen shows after a stake resolves
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChallengeResult {
    pub success: bool,
    pub stake: f64,
    pub payout: f64,
}

impl ChallengeResult {
    pub fn new(success: bool, stake: f64) -> Self {
        Self {
            success,
            stake,
            payout: payout_for(stake, success),
        }
    }

    /// Gain or loss relative to the stake
    pub fn net(&self) -> f64 {
        if self.success {
            self.payout - self.stake
        } else {
            -self.stake
        }
    }

    pub fn bonus(&self) -> f64 {
        if self.success {
            self.payout - self.stake
        } else {
            0.0
        }
    }
}

/// Platform-wide pool figures shown next to the stake form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PoolStats {
    pub total_active_stakes: f64,
    pub success_rate: f64,
    pub average_stake: f64,
    pub total_bonus_paid: f64,
    pub active_participants: u32,
}

impl Default for PoolStats {
    fn default() -> Self {
        Self {
            total_active_stakes: 2847.0,
            success_rate: 0.73,
            average_stake: 12.50,
            total_bonus_paid: 15420.0,
            active_participants: 234,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> (ActiveChallenge, DateTime<Utc>) {
        let now = Utc::now();
        let active = ActiveChallenge::start("1", 10.0, 30, now).unwrap();
        (active, now)
    }

    #[test]
    fn test_start_validates_inputs() {
        let now = Utc::now();
        assert!(ActiveChallenge::start("1", 0.5, 30, now).is_err());
        assert!(ActiveChallenge::start("1", 10.0, 7, now).is_err());
    }

    #[test]
    fn test_countdown_and_urgency() {
        let (active, now) = started();
        assert_eq!(active.urgency(now), Urgency::Normal);
        assert_eq!(active.urgency(now + Duration::minutes(26)), Urgency::Warning);
        assert_eq!(active.urgency(now + Duration::minutes(30)), Urgency::TimeUp);
        assert_eq!(active.remaining(now + Duration::hours(2)), Duration::zero());
        assert!(active.is_time_up(now + Duration::minutes(31)));
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(Duration::seconds(3725)), "1:02:05");
        assert_eq!(format_countdown(Duration::seconds(125)), "2:05");
        assert_eq!(format_countdown(Duration::seconds(-5)), "0:00");
    }

    #[test]
    fn test_photo_only_after_time_up() {
        let (mut active, now) = started();
        assert!(active.attach_photo("https://x/p.jpg", now).is_err());

        let later = now + Duration::minutes(30);
        assert!(active.attach_photo("  ", later).is_err());
        active.attach_photo("https://x/p.jpg", later).unwrap();
        active.attach_photo("https://x/q.jpg", later).unwrap();
        assert_eq!(active.photo_url.as_deref(), Some("https://x/q.jpg"));
    }

    #[test]
    fn test_submit_requires_photo() {
        let (mut active, now) = started();
        assert_eq!(active.submit_proof().unwrap_err(), DomainError::PhotoRequired);

        active
            .attach_photo("https://x/p.jpg", now + Duration::minutes(30))
            .unwrap();
        let result = active.submit_proof().unwrap();
        assert!(result.success);
        assert!((result.payout - 12.0).abs() < 1e-9);
        assert!((result.bonus() - 2.0).abs() < 1e-9);

        assert!(active.quit().is_err());
        assert!(active.submit_proof().is_err());
    }

    #[test]
    fn test_quit_loses_stake() {
        let (mut active, _) = started();
        let result = active.quit().unwrap();
        assert!(!result.success);
        assert_eq!(result.payout, 0.0);
        assert_eq!(result.net(), -10.0);
        assert_eq!(result.bonus(), 0.0);
    }
}
