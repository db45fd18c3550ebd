//! Random generators for users, challenges, photos, comments and activities
//!
//! All generators take the RNG and the clock explicitly so a seed reproduces
//! the same dataset.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::catalog::{
    ACHIEVEMENTS, AVATAR_URLS, CHALLENGE_TEMPLATES, COMMENT_TEXTS, FEED_ACHIEVEMENTS,
    PHOTO_DESCRIPTIONS, SAMPLE_PHOTOS, USERNAME_ADJECTIVES, USERNAME_NOUNS,
};
use crate::domain::{
    Activity, ActivityKind, Challenge, ChallengePhoto, Comment, Currency, User,
};

const DURATION_CHOICES: [u32; 6] = [2, 4, 8, 12, 24, 48];
const STAKE_CHOICES: [f64; 6] = [1.0, 5.0, 10.0, 25.0, 50.0, 100.0];
const CHALLENGE_CURRENCIES: [Currency; 3] = [Currency::Usdc, Currency::Eth, Currency::Usdt];

/// Default number of generated feed events
pub const ACTIVITY_COUNT: usize = 100;

fn random_address<R: Rng>(rng: &mut R) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let body: String = (0..40)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect();
    format!("0x{}", body)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Generate `count` users. Ranks follow total earnings, 1 being the top earner.
pub fn generate_users<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<User> {
    let mut taken = HashSet::new();
    let mut users = Vec::with_capacity(count);

    for i in 0..count {
        let mut username = format!(
            "{}{}",
            pick(rng, &USERNAME_ADJECTIVES),
            pick(rng, &USERNAME_NOUNS)
        );
        if !taken.insert(username.clone()) {
            username = format!("{}{}", username, i + 1);
            taken.insert(username.clone());
        }

        let completed_challenges = rng.gen_range(0..120);
        let failed_challenges = rng.gen_range(0..30);
        let total_earned = round_cents(rng.gen_range(0.0..5000.0));
        let total_staked = round_cents(total_earned * rng.gen_range(0.5..1.5) + 50.0);
        let longest_streak = rng.gen_range(0..60);
        let current_streak = rng.gen_range(0..=longest_streak);

        let achievement_count = rng.gen_range(0..5);
        let achievements = ACHIEVEMENTS
            .choose_multiple(rng, achievement_count)
            .map(|a| a.id.to_string())
            .collect();

        let mut user = User {
            id: (i + 1).to_string(),
            username,
            address: random_address(rng),
            avatar: AVATAR_URLS[i % AVATAR_URLS.len()].to_string(),
            total_earned,
            total_staked,
            current_streak,
            longest_streak,
            success_rate: 0.0,
            rank: 0,
            achievements,
            followers: rng.gen_range(0..2000),
            following: rng.gen_range(0..300),
            is_verified: rng.gen_bool(0.3),
            joined_at: now - Duration::days(rng.gen_range(0..365)),
            completed_challenges,
            failed_challenges,
            is_following: Some(false),
            notifications_enabled: true,
        };
        user.recompute_success_rate();
        users.push(user);
    }

    assign_ranks(&mut users);
    users
}

/// Rank users by total earnings without reordering them
pub fn assign_ranks(users: &mut [User]) {
    let mut order: Vec<usize> = (0..users.len()).collect();
    order.sort_by(|&a, &b| users[b].total_earned.total_cmp(&users[a].total_earned));
    for (rank, idx) in order.into_iter().enumerate() {
        users[idx].rank = rank as u32 + 1;
    }
}

/// Generate 3 to 5 variations of every template, each with 1 to 5 photos
pub fn generate_challenges<R: Rng>(
    rng: &mut R,
    users: &[User],
    now: DateTime<Utc>,
) -> Vec<Challenge> {
    let creators: Vec<&str> = users.iter().take(10).map(|u| u.username.as_str()).collect();
    let photographers: Vec<&User> = users.iter().take(20).collect();
    let mut challenges = Vec::new();

    for template in CHALLENGE_TEMPLATES.iter() {
        let variations = rng.gen_range(3..=5);
        for _ in 0..variations {
            let id = (challenges.len() + 1).to_string();
            let started_at = now - Duration::seconds(rng.gen_range(0..48 * 3600));
            let duration_hours = *pick(rng, &DURATION_CHOICES);
            let ends_at = started_at + Duration::hours(duration_hours as i64);
            let participants: u32 = rng.gen_range(5..55);
            let completed = (participants as f64 * rng.gen_range(0.3..0.8)).floor() as u32;
            let stake_amount = *pick(rng, &STAKE_CHOICES);
            let created_by = if creators.is_empty() {
                "TouchGrass".to_string()
            } else {
                pick(rng, &creators).to_string()
            };

            let mut challenge = Challenge {
                id,
                title: template.title.to_string(),
                description: template.description.to_string(),
                stake_amount,
                stake_currency: *pick(rng, &CHALLENGE_CURRENCIES),
                duration: format!("{}h", duration_hours),
                duration_hours,
                participants,
                completed,
                total_pot: stake_amount * participants as f64,
                created_by,
                started_at,
                ends_at,
                category: template.category,
                difficulty: template.difficulty,
                is_active: ends_at > now,
                rules: template.rules.iter().map(|r| r.to_string()).collect(),
                photos: Vec::new(),
                max_participants: Some(participants + rng.gen_range(0..20)),
                tags: template.tags.iter().map(|t| t.to_string()).collect(),
            };
            challenge.photos = generate_photos(rng, &challenge.id, &photographers, now);
            challenges.push(challenge);
        }
    }

    challenges
}

fn generate_photos<R: Rng>(
    rng: &mut R,
    challenge_id: &str,
    photographers: &[&User],
    now: DateTime<Utc>,
) -> Vec<ChallengePhoto> {
    let count = rng.gen_range(1..=5);
    (0..count)
        .map(|i| {
            let (user_id, username) = match photographers.choose(rng) {
                Some(user) => (user.id.clone(), user.username.clone()),
                None => ("0".to_string(), "anonymous".to_string()),
            };
            ChallengePhoto {
                id: format!("photo_{}_{}", challenge_id, i),
                challenge_id: challenge_id.to_string(),
                user_id,
                username,
                image_url: pick(rng, &SAMPLE_PHOTOS).to_string(),
                description: pick(rng, &PHOTO_DESCRIPTIONS).to_string(),
                uploaded_at: now - Duration::seconds(rng.gen_range(0..24 * 3600)),
                votes: rng.gen_range(0..50),
                user_vote: None,
                is_verified: rng.gen_bool(0.7),
            }
        })
        .collect()
}

/// A handful of comments on each of the first challenges
pub fn generate_comments<R: Rng>(
    rng: &mut R,
    users: &[User],
    challenges: &[Challenge],
    now: DateTime<Utc>,
) -> Vec<Comment> {
    let mut comments = Vec::new();
    if users.is_empty() {
        return comments;
    }

    for challenge in challenges.iter().take(10) {
        for _ in 0..rng.gen_range(0..4) {
            let author = pick(rng, users);
            comments.push(Comment {
                id: format!("comment_{}", comments.len() + 1),
                challenge_id: challenge.id.clone(),
                user_id: author.id.clone(),
                username: author.username.clone(),
                user_avatar: author.avatar.clone(),
                content: pick(rng, &COMMENT_TEXTS).to_string(),
                timestamp: now - Duration::seconds(rng.gen_range(0..24 * 3600)),
                likes: rng.gen_range(0..25),
                is_liked: false,
            });
        }
    }

    comments
}

/// Generate `count` feed events sorted newest first
pub fn generate_activities<R: Rng>(
    rng: &mut R,
    users: &[User],
    challenges: &[Challenge],
    now: DateTime<Utc>,
    count: usize,
) -> Vec<Activity> {
    if users.is_empty() || challenges.is_empty() {
        return Vec::new();
    }

    let actors = &users[..users.len().min(20)];
    let targets = &challenges[..challenges.len().min(10)];

    let mut activities: Vec<Activity> = (1..=count)
        .map(|id| {
            let kind = *pick(rng, ActivityKind::all());
            let user = pick(rng, actors);
            let challenge = pick(rng, targets);

            let mut amount = None;
            let description = match kind {
                ActivityKind::ChallengeCreated => format!("created \"{}\"", challenge.title),
                ActivityKind::ChallengeJoined => format!("joined \"{}\"", challenge.title),
                ActivityKind::ChallengeCompleted => format!("completed \"{}\"", challenge.title),
                ActivityKind::PayoutReceived => {
                    let value: f64 = rng.gen_range(10.0..110.0);
                    amount = Some(value);
                    format!("received {:.2} USDC from \"{}\"", value, challenge.title)
                }
                ActivityKind::AchievementUnlocked => {
                    format!("unlocked \"{}\" achievement", pick(rng, &FEED_ACHIEVEMENTS))
                }
            };

            Activity {
                id: id.to_string(),
                kind,
                user: user.username.clone(),
                user_avatar: user.avatar.clone(),
                challenge: Some(challenge.id.clone()),
                challenge_title: Some(challenge.title.clone()),
                amount,
                timestamp: now - Duration::seconds(rng.gen_range(0..7 * 24 * 3600)),
                description,
            }
        })
        .collect();

    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_users_ranked_by_earnings() {
        let mut rng = StdRng::seed_from_u64(7);
        let users = generate_users(&mut rng, 25, Utc::now());

        assert_eq!(users.len(), 25);
        let top = users.iter().find(|u| u.rank == 1).unwrap();
        assert!(users.iter().all(|u| u.total_earned <= top.total_earned));

        let names: HashSet<_> = users.iter().map(|u| &u.username).collect();
        assert_eq!(names.len(), users.len());
        assert!(users.iter().all(|u| u.address.len() == 42));
    }

    #[test]
    fn test_challenge_shape() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);
        let users = generate_users(&mut rng, 25, now);
        let challenges = generate_challenges(&mut rng, &users, now);

        assert!(challenges.len() >= 18 && challenges.len() <= 30);
        assert_eq!(challenges[0].id, "1");

        let creators: Vec<_> = users.iter().take(10).map(|u| u.username.clone()).collect();
        for c in &challenges {
            assert!((5..55).contains(&c.participants));
            assert!(c.completed <= c.participants);
            assert_eq!(c.total_pot, c.stake_amount * c.participants as f64);
            assert_eq!(c.is_active, c.ends_at > now);
            assert!(c.max_participants.unwrap() >= c.participants);
            assert!(creators.contains(&c.created_by));
            assert!((1..=5).contains(&c.photos.len()));
            assert_eq!(c.photos[0].id, format!("photo_{}_0", c.id));
        }
    }

    #[test]
    fn test_activities_sorted_newest_first() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(11);
        let users = generate_users(&mut rng, 25, now);
        let challenges = generate_challenges(&mut rng, &users, now);
        let activities = generate_activities(&mut rng, &users, &challenges, now, ACTIVITY_COUNT);

        assert_eq!(activities.len(), ACTIVITY_COUNT);
        assert!(activities
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));

        for activity in &activities {
            if activity.kind == ActivityKind::PayoutReceived {
                let amount = activity.amount.unwrap();
                assert!((10.0..110.0).contains(&amount));
                assert!(activity.description.starts_with("received "));
            } else {
                assert!(activity.amount.is_none());
            }
        }
    }

    #[test]
    fn test_empty_inputs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_activities(&mut rng, &[], &[], Utc::now(), 10).is_empty());
        assert!(generate_comments(&mut rng, &[], &[], Utc::now()).is_empty());
    }
}
