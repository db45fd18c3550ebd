//! Activity feed, newest first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Activity, ActivityKind, User};

/// Number of events shown in feed widgets
pub const FEED_LIMIT: usize = 10;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActivityFeed {
    activities: Vec<Activity>,
    next_id: u64,
}

impl ActivityFeed {
    pub fn new(mut activities: Vec<Activity>) -> Self {
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let next_id = activities
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            activities,
            next_id,
        }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn recent(&self, limit: usize) -> Vec<Activity> {
        self.activities.iter().take(limit).cloned().collect()
    }

    pub fn by_user(&self, username: &str) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.user == username)
            .cloned()
            .collect()
    }

    /// Re-attribute past events after a username change
    pub fn rename_user(&mut self, old: &str, new: &str) {
        for activity in self.activities.iter_mut().filter(|a| a.user == old) {
            activity.user = new.to_string();
        }
    }

    /// Insert keeping newest-first order
    pub fn push(&mut self, activity: Activity) {
        let pos = self
            .activities
            .iter()
            .position(|a| a.timestamp <= activity.timestamp)
            .unwrap_or(self.activities.len());
        self.activities.insert(pos, activity);
    }

    /// Build an event for `user` with a fresh id and record it
    pub fn record(
        &mut self,
        kind: ActivityKind,
        user: &User,
        challenge: Option<(&str, &str)>,
        amount: Option<f64>,
        description: String,
        now: DateTime<Utc>,
    ) -> Activity {
        let activity = Activity {
            id: self.next_id.to_string(),
            kind,
            user: user.username.clone(),
            user_avatar: user.avatar.clone(),
            challenge: challenge.map(|(id, _)| id.to_string()),
            challenge_title: challenge.map(|(_, title)| title.to_string()),
            amount,
            timestamp: now,
            description,
        };
        self.next_id += 1;
        self.push(activity.clone());
        activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;
    use chrono::Duration;

    #[test]
    fn test_recent_is_newest_first() {
        let now = Utc::now();
        let data = MockDataset::generate(9, now);
        let mut feed = ActivityFeed::new(data.activities);

        let user = &data.users[0];
        let recorded = feed.record(
            ActivityKind::ChallengeJoined,
            user,
            Some(("1", "Forest Bathing Session")),
            None,
            "joined \"Forest Bathing Session\"".to_string(),
            now + Duration::seconds(1),
        );

        let recent = feed.recent(FEED_LIMIT);
        assert_eq!(recent.len(), FEED_LIMIT);
        assert_eq!(recent[0].id, recorded.id);
        assert_eq!(recorded.id, "101");
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(feed.by_user(&user.username).iter().any(|a| a.id == recorded.id));
    }

    #[test]
    fn test_rename_user() {
        let data = MockDataset::generate(9, Utc::now());
        let mut feed = ActivityFeed::new(data.activities);
        let name = feed.recent(1)[0].user.clone();
        let count = feed.by_user(&name).len();

        feed.rename_user(&name, "renamed");
        assert!(feed.by_user(&name).is_empty());
        assert_eq!(feed.by_user("renamed").len(), count);
    }

    #[test]
    fn test_push_keeps_order() {
        let now = Utc::now();
        let data = MockDataset::generate(9, now);
        let mut feed = ActivityFeed::new(Vec::new());

        let mut old = data.activities[0].clone();
        old.timestamp = now - Duration::days(30);
        let mut new = data.activities[1].clone();
        new.timestamp = now;

        feed.push(old.clone());
        feed.push(new.clone());
        let recent = feed.recent(2);
        assert_eq!(recent[0].timestamp, now);
        assert_eq!(recent[1].timestamp, old.timestamp);
    }
}
