//! Public user profiles

use serde::{Deserialize, Serialize};

use super::achievements::held_by;
use super::feed::ActivityFeed;
use crate::challenges::{ChallengeBoard, ChallengeFilter};
use crate::domain::{Achievement, Activity, Challenge, DomainError, DomainResult, User};

/// Everything the profile page shows for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub user: User,
    pub achievements: Vec<Achievement>,
    pub created_challenges: Vec<Challenge>,
    pub activities: Vec<Activity>,
}

impl ProfileView {
    /// Matches a username case-insensitively, or an exact user id
    pub fn lookup(
        username: &str,
        users: &[User],
        board: &ChallengeBoard,
        feed: &ActivityFeed,
    ) -> DomainResult<Self> {
        let user = users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username) || u.id == username)
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?
            .clone();

        let created_challenges = board.list(&ChallengeFilter {
            creator: Some(user.username.clone()),
            ..Default::default()
        });
        let activities = feed.by_user(&user.username);

        Ok(Self {
            achievements: held_by(&user),
            user,
            created_challenges,
            activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;
    use chrono::Utc;

    #[test]
    fn test_lookup() {
        let data = MockDataset::generate(21, Utc::now());
        let board = ChallengeBoard::new(data.challenges.clone());
        let feed = ActivityFeed::new(data.activities.clone());

        let name = data.challenges[0].created_by.to_uppercase();
        let profile = ProfileView::lookup(&name, &data.users, &board, &feed).unwrap();
        assert!(!profile.created_challenges.is_empty());
        assert!(profile
            .created_challenges
            .iter()
            .all(|c| c.created_by == profile.user.username));
        assert!(profile
            .activities
            .iter()
            .all(|a| a.user == profile.user.username));

        let by_id = ProfileView::lookup(&profile.user.id, &data.users, &board, &feed).unwrap();
        assert_eq!(by_id.user.username, profile.user.username);

        assert_eq!(
            ProfileView::lookup("nobody", &data.users, &board, &feed).unwrap_err(),
            DomainError::UserNotFound("nobody".to_string())
        );
    }
}
