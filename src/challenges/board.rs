//! Challenge board
//!
//! The catalogue of challenges with their proof photos and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::form::ChallengeForm;
use crate::domain::{
    Challenge, ChallengeCategory, ChallengePhoto, Comment, Difficulty, DomainError, DomainResult,
    PhotoVote, User,
};

/// Number of challenges shown in the "popular" grid
pub const POPULAR_LIMIT: usize = 6;

/// Criteria for listing challenges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeFilter {
    pub active: Option<bool>,
    pub category: Option<ChallengeCategory>,
    pub difficulty: Option<Difficulty>,
    /// Username of the creator
    pub creator: Option<String>,
    pub limit: Option<usize>,
}

impl ChallengeFilter {
    fn matches(&self, challenge: &Challenge) -> bool {
        self.active.map_or(true, |a| challenge.is_active == a)
            && self.category.map_or(true, |c| challenge.category == c)
            && self.difficulty.map_or(true, |d| challenge.difficulty == d)
            && self
                .creator
                .as_deref()
                .map_or(true, |c| challenge.created_by == c)
    }
}

#[derive(Debug, Default)]
pub struct ChallengeBoard {
    challenges: Vec<Challenge>,
    comments: Vec<Comment>,
    next_comment: usize,
}

impl ChallengeBoard {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        Self::with_comments(challenges, Vec::new())
    }

    pub fn with_comments(challenges: Vec<Challenge>, comments: Vec<Comment>) -> Self {
        let next_comment = comments.len() + 1;
        Self {
            challenges,
            comments,
            next_comment,
        }
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn all(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn list(&self, filter: &ChallengeFilter) -> Vec<Challenge> {
        let matching = self.challenges.iter().filter(|c| filter.matches(c)).cloned();
        match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Active challenges in catalogue order
    pub fn popular(&self, limit: usize) -> Vec<Challenge> {
        self.list(&ChallengeFilter {
            active: Some(true),
            limit: Some(limit),
            ..Default::default()
        })
    }

    pub fn get(&self, id: &str) -> DomainResult<&Challenge> {
        self.challenges
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::ChallengeNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> DomainResult<&mut Challenge> {
        self.challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::ChallengeNotFound(id.to_string()))
    }

    /// Number of challenges created by `username`
    pub fn created_by_count(&self, username: &str) -> usize {
        self.challenges
            .iter()
            .filter(|c| c.created_by == username)
            .count()
    }

    /// Point challenges created under `old` at the creator's new username
    pub fn rename_creator(&mut self, old: &str, new: &str) -> usize {
        let mut renamed = 0;
        for challenge in self.challenges.iter_mut().filter(|c| c.created_by == old) {
            challenge.created_by = new.to_string();
            renamed += 1;
        }
        renamed
    }

    /// Add a challenge from the creation form. New challenges go first.
    pub fn create(
        &mut self,
        form: ChallengeForm,
        creator: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Challenge> {
        let mut id = format!("challenge-{}", now.timestamp_millis());
        let mut n = 1;
        while self.challenges.iter().any(|c| c.id == id) {
            id = format!("challenge-{}-{}", now.timestamp_millis(), n);
            n += 1;
        }

        let challenge = form.into_challenge(id, creator, now)?;
        tracing::info!(challenge_id = %challenge.id, creator, "Challenge created");
        self.challenges.insert(0, challenge.clone());
        Ok(challenge)
    }

    /// Count a new participant and their stake in the pot
    pub fn record_join(&mut self, id: &str, now: DateTime<Utc>) -> DomainResult<Challenge> {
        let challenge = self.get_mut(id)?;
        challenge.refresh_activity(now);
        if !challenge.is_active {
            return Err(DomainError::InvalidTransition {
                from: "ended".to_string(),
                action: "join".to_string(),
            });
        }
        if challenge.is_full() {
            return Err(DomainError::ChallengeFull(id.to_string()));
        }
        challenge.participants += 1;
        challenge.total_pot += challenge.stake_amount;
        Ok(challenge.clone())
    }

    pub fn record_completion(&mut self, id: &str) -> DomainResult<Challenge> {
        let challenge = self.get_mut(id)?;
        if challenge.completed < challenge.participants {
            challenge.completed += 1;
        }
        Ok(challenge.clone())
    }

    /// Re-evaluate every challenge's active flag
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        for challenge in &mut self.challenges {
            challenge.refresh_activity(now);
        }
    }

    pub fn photos(&self, id: &str) -> DomainResult<Vec<ChallengePhoto>> {
        Ok(self.get(id)?.photos.clone())
    }

    pub fn add_photo(
        &mut self,
        challenge_id: &str,
        user: &User,
        image_url: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<ChallengePhoto> {
        if image_url.trim().is_empty() {
            return Err(DomainError::InvalidInput("image URL is required".to_string()));
        }
        let challenge = self.get_mut(challenge_id)?;

        let photo = ChallengePhoto {
            id: format!("photo_{}_{}", challenge_id, challenge.photos.len()),
            challenge_id: challenge_id.to_string(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            image_url: image_url.to_string(),
            description: description.trim().to_string(),
            uploaded_at: now,
            votes: 0,
            user_vote: None,
            is_verified: false,
        };
        challenge.photos.push(photo.clone());
        Ok(photo)
    }

    /// Apply the current user's vote. Repeating a vote withdraws it.
    pub fn vote_photo(&mut self, photo_id: &str, vote: PhotoVote) -> DomainResult<ChallengePhoto> {
        let photo = self
            .challenges
            .iter_mut()
            .flat_map(|c| c.photos.iter_mut())
            .find(|p| p.id == photo_id)
            .ok_or_else(|| DomainError::PhotoNotFound(photo_id.to_string()))?;

        match photo.user_vote {
            Some(previous) if previous == vote => {
                photo.votes -= vote.weight();
                photo.user_vote = None;
            }
            Some(previous) => {
                photo.votes += vote.weight() - previous.weight();
                photo.user_vote = Some(vote);
            }
            None => {
                photo.votes += vote.weight();
                photo.user_vote = Some(vote);
            }
        }
        Ok(photo.clone())
    }

    /// Total votes across all photos uploaded by `user_id`
    pub fn votes_received(&self, user_id: &str) -> i64 {
        self.photos_by(user_id).map(|p| p.votes.max(0)).sum()
    }

    pub fn photos_uploaded(&self, user_id: &str) -> usize {
        self.photos_by(user_id).count()
    }

    fn photos_by<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a ChallengePhoto> {
        self.challenges
            .iter()
            .flat_map(|c| c.photos.iter())
            .filter(move |p| p.user_id == user_id)
    }

    /// Comments on a challenge, oldest first
    pub fn comments(&self, challenge_id: &str) -> DomainResult<Vec<Comment>> {
        self.get(challenge_id)?;
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.challenge_id == challenge_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(comments)
    }

    pub fn add_comment(
        &mut self,
        challenge_id: &str,
        user: &User,
        content: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        self.get(challenge_id)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::InvalidInput("comment is empty".to_string()));
        }

        let comment = Comment {
            id: format!("comment_{}", self.next_comment),
            challenge_id: challenge_id.to_string(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            user_avatar: user.avatar.clone(),
            content: content.to_string(),
            timestamp: now,
            likes: 0,
            is_liked: false,
        };
        self.next_comment += 1;
        self.comments.push(comment.clone());
        Ok(comment)
    }

    pub fn toggle_comment_like(&mut self, comment_id: &str) -> DomainResult<Comment> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DomainError::CommentNotFound(comment_id.to_string()))?;

        if comment.is_liked {
            comment.likes = comment.likes.saturating_sub(1);
        } else {
            comment.likes += 1;
        }
        comment.is_liked = !comment.is_liked;
        Ok(comment.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use crate::mock::MockDataset;
    use chrono::Duration;

    fn board() -> (ChallengeBoard, User, DateTime<Utc>) {
        let now = Utc::now();
        let data = MockDataset::generate(3, now);
        let user = data.users[0].clone();
        (ChallengeBoard::new(data.challenges), user, now)
    }

    fn active_id(board: &ChallengeBoard) -> String {
        board
            .all()
            .iter()
            .find(|c| c.is_active && !c.is_full())
            .map(|c| c.id.clone())
            .unwrap()
    }

    #[test]
    fn test_list_filters() {
        let (board, _, _) = board();
        let detox = board.list(&ChallengeFilter {
            category: Some(ChallengeCategory::Detox),
            ..Default::default()
        });
        assert!(!detox.is_empty());
        assert!(detox.iter().all(|c| c.category == ChallengeCategory::Detox));

        let limited = board.list(&ChallengeFilter {
            limit: Some(2),
            ..Default::default()
        });
        assert_eq!(limited.len(), 2);

        assert!(board.popular(POPULAR_LIMIT).iter().all(|c| c.is_active));
        assert!(board.popular(POPULAR_LIMIT).len() <= POPULAR_LIMIT);
    }

    #[test]
    fn test_get_unknown() {
        let (board, _, _) = board();
        assert_eq!(
            board.get("nope").unwrap_err(),
            DomainError::ChallengeNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_create_prepends() {
        let (mut board, user, now) = board();
        let form = ChallengeForm {
            title: "Picnic".to_string(),
            description: "Eat outside".to_string(),
            stake_amount: 10.0,
            stake_currency: Currency::Xp,
            duration_hours: 2,
            category: ChallengeCategory::Social,
            difficulty: Difficulty::Easy,
            rules: String::new(),
            max_participants: Some(5),
        };

        let first = board.create(form.clone(), &user.username, now).unwrap();
        let second = board.create(form, &user.username, now).unwrap();

        assert_eq!(first.id, format!("challenge-{}", now.timestamp_millis()));
        assert_ne!(first.id, second.id);
        assert_eq!(board.all()[0].id, second.id);
        assert!(board.created_by_count(&user.username) >= 2);
    }

    #[test]
    fn test_rename_creator_keeps_ownership() {
        let (mut board, user, _) = board();
        let owned = board.created_by_count(&user.username);
        assert!(owned > 0);

        assert_eq!(board.rename_creator(&user.username, "grass_toucher"), owned);
        assert_eq!(board.created_by_count(&user.username), 0);
        assert_eq!(board.created_by_count("grass_toucher"), owned);
    }

    #[test]
    fn test_join_updates_pot_and_respects_cap() {
        let (mut board, _, now) = board();
        let id = active_id(&board);
        let before = board.get(&id).unwrap().clone();

        let after = board.record_join(&id, now).unwrap();
        assert_eq!(after.participants, before.participants + 1);
        assert_eq!(after.total_pot, before.total_pot + before.stake_amount);

        let max = after.max_participants.unwrap();
        for _ in after.participants..max {
            board.record_join(&id, now).unwrap();
        }
        assert_eq!(
            board.record_join(&id, now).unwrap_err(),
            DomainError::ChallengeFull(id.clone())
        );
    }

    #[test]
    fn test_join_rejects_ended() {
        let (mut board, _, now) = board();
        let id = active_id(&board);
        let err = board.record_join(&id, now + Duration::days(10)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn test_photo_votes_toggle() {
        let (mut board, user, now) = board();
        let id = active_id(&board);
        let photo = board.add_photo(&id, &user, "https://x/p.jpg", "done", now).unwrap();
        assert_eq!(photo.votes, 0);

        let p = board.vote_photo(&photo.id, PhotoVote::Up).unwrap();
        assert_eq!((p.votes, p.user_vote), (1, Some(PhotoVote::Up)));

        let p = board.vote_photo(&photo.id, PhotoVote::Down).unwrap();
        assert_eq!((p.votes, p.user_vote), (-1, Some(PhotoVote::Down)));

        let p = board.vote_photo(&photo.id, PhotoVote::Down).unwrap();
        assert_eq!((p.votes, p.user_vote), (0, None));

        assert!(board.vote_photo("missing", PhotoVote::Up).is_err());
        assert!(board.photos_uploaded(&user.id) >= 1);
    }

    #[test]
    fn test_comments() {
        let (mut board, user, now) = board();
        let id = active_id(&board);

        assert!(board.add_comment(&id, &user, "   ", now).is_err());
        let comment = board.add_comment(&id, &user, "See you there", now).unwrap();
        assert_eq!(board.comments(&id).unwrap().len(), 1);

        let liked = board.toggle_comment_like(&comment.id).unwrap();
        assert_eq!((liked.likes, liked.is_liked), (1, true));
        let unliked = board.toggle_comment_like(&comment.id).unwrap();
        assert_eq!((unliked.likes, unliked.is_liked), (0, false));

        assert!(board.comments("nope").is_err());
    }
}
