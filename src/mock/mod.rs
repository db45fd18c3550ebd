//! Mock data
//!
//! Everything the application displays comes from here: a seeded set of
//! users, challenges (with photos), comments and feed events.

pub mod catalog;
pub mod generators;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{Activity, Challenge, Comment, User};

pub use catalog::{achievement_catalog, find_achievement, ACHIEVEMENTS};
pub use generators::{
    assign_ranks, generate_activities, generate_challenges, generate_comments, generate_users,
    ACTIVITY_COUNT,
};

/// Number of generated users
pub const USER_COUNT: usize = 50;

/// A complete generated dataset
#[derive(Debug, Clone)]
pub struct MockDataset {
    pub users: Vec<User>,
    pub challenges: Vec<Challenge>,
    pub comments: Vec<Comment>,
    pub activities: Vec<Activity>,
}

impl MockDataset {
    /// Generate a dataset; the same seed and clock give the same data
    pub fn generate(seed: u64, now: DateTime<Utc>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let users = generate_users(&mut rng, USER_COUNT, now);
        let challenges = generate_challenges(&mut rng, &users, now);
        let comments = generate_comments(&mut rng, &users, &challenges, now);
        let activities = generate_activities(&mut rng, &users, &challenges, now, ACTIVITY_COUNT);

        tracing::debug!(
            seed,
            users = users.len(),
            challenges = challenges.len(),
            activities = activities.len(),
            "Generated mock dataset"
        );

        Self {
            users,
            challenges,
            comments,
            activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_data() {
        let now = Utc::now();
        let a = MockDataset::generate(42, now);
        let b = MockDataset::generate(42, now);

        assert_eq!(a.users, b.users);
        assert_eq!(a.challenges, b.challenges);
        assert_eq!(a.activities, b.activities);
        assert_eq!(a.users.len(), USER_COUNT);
    }

    #[test]
    fn test_different_seed_differs() {
        let now = Utc::now();
        let a = MockDataset::generate(1, now);
        let b = MockDataset::generate(2, now);
        assert_ne!(a.users, b.users);
    }
}
