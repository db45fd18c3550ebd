//! Achievement conditions

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Achievement, User};
use crate::mock::catalog::{find_achievement, ACHIEVEMENTS};

/// Days after launch during which new users count as early adopters
pub const EARLY_ADOPTER_DAYS: i64 = 30;

/// Figures that live outside the user record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AchievementProgress {
    pub photos_uploaded: usize,
    pub photo_votes: i64,
    pub challenges_created: usize,
    pub launched_at: Option<DateTime<Utc>>,
}

fn condition_holds(id: &str, user: &User, progress: &AchievementProgress) -> bool {
    match id {
        "first_touch" => user.completed_challenges >= 1,
        "grass_whale" => user.total_staked > 100.0,
        "streak_warrior" => user.longest_streak >= 10,
        "nature_photographer" => progress.photos_uploaded >= 25,
        "community_champion" => progress.photo_votes >= 100,
        "early_adopter" => progress
            .launched_at
            .map(|launch| user.joined_at <= launch + Duration::days(EARLY_ADOPTER_DAYS))
            .unwrap_or(false),
        "consistent_challenger" => user.completed_challenges >= 50,
        "social_butterfly" => user.following >= 20,
        "mentor" => progress.challenges_created >= 10,
        "perfectionist" => user.success_rate >= 1.0 && user.resolved_challenges() >= 10,
        _ => false,
    }
}

/// Ids of every achievement whose condition holds
pub fn evaluate_achievements(user: &User, progress: &AchievementProgress) -> Vec<&'static str> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| condition_holds(a.id, user, progress))
        .map(|a| a.id)
        .collect()
}

/// Add newly earned achievements to `user` and return them, stamped `now`
pub fn unlock_new(
    user: &mut User,
    progress: &AchievementProgress,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    let fresh: Vec<&'static str> = evaluate_achievements(user, progress)
        .into_iter()
        .filter(|id| !user.has_achievement(id))
        .collect();

    fresh
        .into_iter()
        .filter_map(find_achievement)
        .map(|def| {
            user.achievements.push(def.id.to_string());
            let mut achievement = def.to_achievement();
            achievement.unlocked_at = Some(now);
            achievement
        })
        .collect()
}

/// The achievements `user` holds, in catalogue order
pub fn held_by(user: &User) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| user.has_achievement(a.id))
        .map(|a| a.to_achievement())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;

    fn blank_user() -> User {
        let mut user = MockDataset::generate(1, Utc::now()).users[0].clone();
        user.completed_challenges = 0;
        user.failed_challenges = 0;
        user.total_staked = 0.0;
        user.longest_streak = 0;
        user.following = 0;
        user.achievements.clear();
        user.recompute_success_rate();
        user
    }

    #[test]
    fn test_blank_user_has_nothing() {
        let user = blank_user();
        assert!(evaluate_achievements(&user, &AchievementProgress::default()).is_empty());
    }

    #[test]
    fn test_conditions() {
        let mut user = blank_user();
        user.completed_challenges = 10;
        user.recompute_success_rate();
        user.total_staked = 150.0;
        user.following = 20;

        let progress = AchievementProgress {
            photos_uploaded: 25,
            photo_votes: 100,
            challenges_created: 10,
            launched_at: Some(user.joined_at),
        };
        let ids = evaluate_achievements(&user, &progress);
        for expected in [
            "first_touch",
            "grass_whale",
            "nature_photographer",
            "community_champion",
            "early_adopter",
            "social_butterfly",
            "mentor",
            "perfectionist",
        ] {
            assert!(ids.contains(&expected), "missing {}", expected);
        }
        assert!(!ids.contains(&"streak_warrior"));
        assert!(!ids.contains(&"consistent_challenger"));
    }

    #[test]
    fn test_unlock_only_once() {
        let mut user = blank_user();
        user.completed_challenges = 1;
        user.recompute_success_rate();
        let now = Utc::now();

        let unlocked = unlock_new(&mut user, &AchievementProgress::default(), now);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first_touch");
        assert_eq!(unlocked[0].unlocked_at, Some(now));

        assert!(unlock_new(&mut user, &AchievementProgress::default(), now).is_empty());
        assert_eq!(held_by(&user).len(), 1);
    }
}
