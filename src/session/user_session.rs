//! The logged-in user and their challenge participation
//!
//! Lifecycle of a participation record:
//!
//! ```text
//! join -> active --complete--> pending_verification --verify--> completed | failed
//!            \--forfeit--> failed
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{
    Achievement, ChallengeStatus, Currency, DomainError, DomainResult, User, UserChallenge,
};
use crate::social::achievements::{unlock_new, AchievementProgress};
use crate::staking::payout_for;

/// Partial update of the user's settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub notifications_enabled: Option<bool>,
}

/// Result of verifying a pending challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    pub record: UserChallenge,
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Clone)]
pub struct UserSession {
    user: User,
    challenges: Vec<UserChallenge>,
    followed: BTreeSet<String>,
}

impl UserSession {
    pub fn new(user: User) -> Self {
        Self {
            user,
            challenges: Vec::new(),
            followed: BTreeSet::new(),
        }
    }

    /// Session with one active and one completed challenge
    pub fn seeded(user: User, now: DateTime<Utc>) -> Self {
        let mut session = Self::new(user);

        session
            .challenges
            .push(UserChallenge::new("1", 10.0, Currency::Usdc, now));

        let mut completed = UserChallenge::new("2", 5.0, Currency::Usdc, now - Duration::hours(24));
        completed.status = ChallengeStatus::Completed;
        completed.completed_at = Some(now);
        completed.photo_submitted = true;
        completed.photo_id = Some("photo_2_1".to_string());
        completed.payout = Some(payout_for(5.0, true));
        session.challenges.push(completed);

        session
    }

    pub fn current_user(&self) -> &User {
        &self.user
    }

    pub fn user_challenges(&self) -> &[UserChallenge] {
        &self.challenges
    }

    pub fn by_status(&self, status: ChallengeStatus) -> Vec<UserChallenge> {
        self.challenges
            .iter()
            .filter(|uc| uc.status == status)
            .cloned()
            .collect()
    }

    /// Latest record for a challenge
    pub fn record(&self, challenge_id: &str) -> Option<&UserChallenge> {
        self.challenges
            .iter()
            .rev()
            .find(|uc| uc.challenge_id == challenge_id)
    }

    fn record_mut(&mut self, challenge_id: &str) -> DomainResult<&mut UserChallenge> {
        self.challenges
            .iter_mut()
            .rev()
            .find(|uc| uc.challenge_id == challenge_id)
            .ok_or_else(|| DomainError::NotJoined(challenge_id.to_string()))
    }

    /// Stake still held by active or pending challenges
    pub fn total_active_stake(&self) -> f64 {
        self.challenges
            .iter()
            .filter(|uc| uc.status.is_open())
            .map(|uc| uc.stake_amount)
            .sum()
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.followed.contains(user_id)
    }

    /// Returns whether anything changed
    pub fn follow(&mut self, user_id: &str) -> DomainResult<bool> {
        if user_id == self.user.id {
            return Err(DomainError::InvalidInput("cannot follow yourself".to_string()));
        }
        let added = self.followed.insert(user_id.to_string());
        if added {
            self.user.following += 1;
            tracing::debug!(user_id, "Followed user");
        }
        Ok(added)
    }

    pub fn unfollow(&mut self, user_id: &str) -> bool {
        let removed = self.followed.remove(user_id);
        if removed {
            self.user.following = self.user.following.saturating_sub(1);
            tracing::debug!(user_id, "Unfollowed user");
        }
        removed
    }

    /// Checks `join_challenge` performs, without changing anything
    pub fn ensure_can_join(&self, challenge_id: &str, stake_amount: f64) -> DomainResult<()> {
        if !stake_amount.is_finite() || stake_amount <= 0.0 {
            return Err(DomainError::InvalidStake(
                "Stake must be a positive amount".to_string(),
            ));
        }
        if self
            .record(challenge_id)
            .map(|uc| uc.status.is_open())
            .unwrap_or(false)
        {
            return Err(DomainError::AlreadyJoined(challenge_id.to_string()));
        }
        Ok(())
    }

    pub fn join_challenge(
        &mut self,
        challenge_id: &str,
        stake_amount: f64,
        currency: Currency,
        now: DateTime<Utc>,
    ) -> DomainResult<UserChallenge> {
        self.ensure_can_join(challenge_id, stake_amount)?;

        let record = UserChallenge::new(challenge_id, stake_amount, currency, now);
        self.user.total_staked += stake_amount;
        self.challenges.push(record.clone());
        tracing::info!(challenge_id, stake_amount, %currency, "Joined challenge");
        Ok(record)
    }

    /// Mark an active challenge as submitted for verification
    pub fn complete_challenge(
        &mut self,
        challenge_id: &str,
        photo_id: Option<String>,
    ) -> DomainResult<UserChallenge> {
        let record = self.record_mut(challenge_id)?;
        if record.status != ChallengeStatus::Active {
            return Err(DomainError::InvalidTransition {
                from: record.status.to_string(),
                action: "complete".to_string(),
            });
        }
        record.status = ChallengeStatus::PendingVerification;
        record.photo_submitted = true;
        if photo_id.is_some() {
            record.photo_id = photo_id;
        }
        Ok(record.clone())
    }

    /// Resolve a pending challenge. A submitted photo is the whole verification.
    pub fn verify_challenge(
        &mut self,
        challenge_id: &str,
        progress: &AchievementProgress,
        now: DateTime<Utc>,
    ) -> DomainResult<Verification> {
        let record = self.record_mut(challenge_id)?;
        if record.status != ChallengeStatus::PendingVerification {
            return Err(DomainError::InvalidTransition {
                from: record.status.to_string(),
                action: "verify".to_string(),
            });
        }

        let success = record.photo_submitted;
        let payout = payout_for(record.stake_amount, success);
        record.status = if success {
            ChallengeStatus::Completed
        } else {
            ChallengeStatus::Failed
        };
        record.completed_at = Some(now);
        record.payout = Some(payout);
        let record = record.clone();

        if success {
            self.record_success(payout);
        } else {
            self.record_failure();
        }
        let unlocked = unlock_new(&mut self.user, progress, now);

        tracing::info!(challenge_id, success, payout, unlocked = unlocked.len(), "Challenge verified");
        Ok(Verification { record, unlocked })
    }

    /// Give up on an active challenge; the stake is lost
    pub fn forfeit_challenge(
        &mut self,
        challenge_id: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<UserChallenge> {
        let record = self.record_mut(challenge_id)?;
        if record.status != ChallengeStatus::Active {
            return Err(DomainError::InvalidTransition {
                from: record.status.to_string(),
                action: "forfeit".to_string(),
            });
        }
        record.status = ChallengeStatus::Failed;
        record.completed_at = Some(now);
        record.payout = Some(0.0);
        let record = record.clone();

        self.record_failure();
        tracing::info!(challenge_id, "Challenge forfeited");
        Ok(record)
    }

    fn record_success(&mut self, payout: f64) {
        let user = &mut self.user;
        user.completed_challenges += 1;
        user.current_streak += 1;
        user.longest_streak = user.longest_streak.max(user.current_streak);
        user.total_earned += payout;
        user.recompute_success_rate();
    }

    fn record_failure(&mut self) {
        let user = &mut self.user;
        user.failed_challenges += 1;
        user.current_streak = 0;
        user.recompute_success_rate();
    }

    pub fn update_settings(&mut self, settings: UserSettings) -> DomainResult<User> {
        if let Some(username) = settings.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(DomainError::InvalidInput("username cannot be empty".to_string()));
            }
            self.user.username = username.to_string();
        }
        if let Some(avatar) = settings.avatar {
            self.user.avatar = avatar;
        }
        if let Some(enabled) = settings.notifications_enabled {
            self.user.notifications_enabled = enabled;
        }
        Ok(self.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;

    fn session() -> (UserSession, DateTime<Utc>) {
        let now = Utc::now();
        let user = MockDataset::generate(42, now).users[0].clone();
        (UserSession::seeded(user, now), now)
    }

    #[test]
    fn test_seeded_records() {
        let (session, _) = session();
        assert_eq!(session.user_challenges().len(), 2);

        let active = session.by_status(ChallengeStatus::Active);
        assert_eq!(active[0].challenge_id, "1");
        assert_eq!(active[0].stake_amount, 10.0);

        let done = session.record("2").unwrap();
        assert_eq!(done.status, ChallengeStatus::Completed);
        assert!((done.payout.unwrap() - 6.0).abs() < 1e-9);
        assert_eq!(session.total_active_stake(), 10.0);
    }

    #[test]
    fn test_follow_unfollow() {
        let (mut session, _) = session();
        let before = session.current_user().following;
        let own_id = session.current_user().id.clone();

        assert!(session.follow("99").unwrap());
        assert!(!session.follow("99").unwrap());
        assert_eq!(session.current_user().following, before + 1);
        assert!(session.is_following("99"));

        assert!(session.unfollow("99"));
        assert!(!session.unfollow("99"));
        assert_eq!(session.current_user().following, before);

        assert!(session.follow(&own_id).is_err());
    }

    #[test]
    fn test_join_rejects_duplicates() {
        let (mut session, now) = session();
        assert!(matches!(
            session.join_challenge("1", 5.0, Currency::Usdc, now),
            Err(DomainError::AlreadyJoined(_))
        ));

        // A resolved challenge can be joined again
        let staked = session.current_user().total_staked;
        session.join_challenge("2", 5.0, Currency::Usdc, now).unwrap();
        assert_eq!(session.current_user().total_staked, staked + 5.0);
        assert_eq!(session.record("2").unwrap().status, ChallengeStatus::Active);

        assert!(session.join_challenge("3", 0.0, Currency::Usdc, now).is_err());
    }

    #[test]
    fn test_complete_then_verify() {
        let (mut session, now) = session();
        let completed_before = session.current_user().completed_challenges;
        let earned_before = session.current_user().total_earned;

        assert!(session.verify_challenge("1", &AchievementProgress::default(), now).is_err());

        let record = session.complete_challenge("1", Some("photo_1_9".to_string())).unwrap();
        assert_eq!(record.status, ChallengeStatus::PendingVerification);
        assert!(record.photo_submitted);

        let verification = session
            .verify_challenge("1", &AchievementProgress::default(), now)
            .unwrap();
        assert_eq!(verification.record.status, ChallengeStatus::Completed);
        assert!((verification.record.payout.unwrap() - 12.0).abs() < 1e-9);

        let user = session.current_user();
        assert_eq!(user.completed_challenges, completed_before + 1);
        assert!((user.total_earned - earned_before - 12.0).abs() < 1e-9);
        assert!(user.has_achievement("first_touch"));
    }

    #[test]
    fn test_forfeit() {
        let (mut session, now) = session();
        let failed_before = session.current_user().failed_challenges;

        let record = session.forfeit_challenge("1", now).unwrap();
        assert_eq!(record.status, ChallengeStatus::Failed);
        assert_eq!(record.payout, Some(0.0));
        assert_eq!(session.current_user().failed_challenges, failed_before + 1);
        assert_eq!(session.current_user().current_streak, 0);

        assert!(matches!(
            session.forfeit_challenge("2", now),
            Err(DomainError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.forfeit_challenge("404", now),
            Err(DomainError::NotJoined(_))
        ));
    }

    #[test]
    fn test_update_settings() {
        let (mut session, _) = session();
        let user = session
            .update_settings(UserSettings {
                username: Some("  MeadowRunner ".to_string()),
                notifications_enabled: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(user.username, "MeadowRunner");
        assert!(!user.notifications_enabled);

        assert!(session
            .update_settings(UserSettings {
                username: Some(" ".to_string()),
                ..Default::default()
            })
            .is_err());
    }
}
