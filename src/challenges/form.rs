//! Challenge creation form

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Challenge, ChallengeCategory, Currency, Difficulty, DomainError, DomainResult,
};

/// User input for a new challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeForm {
    pub title: String,
    pub description: String,
    pub stake_amount: f64,
    #[serde(default = "default_currency")]
    pub stake_currency: Currency,
    pub duration_hours: u32,
    #[serde(default = "default_category")]
    pub category: ChallengeCategory,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// One rule per line
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub max_participants: Option<u32>,
}

/// One year
pub const MAX_DURATION_HOURS: u32 = 24 * 365;

fn default_currency() -> Currency {
    Currency::Xp
}

fn default_category() -> ChallengeCategory {
    ChallengeCategory::Outdoor
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

impl ChallengeForm {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::InvalidChallenge("title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::InvalidChallenge(
                "description is required".to_string(),
            ));
        }
        if !self.stake_amount.is_finite() || self.stake_amount <= 0.0 {
            return Err(DomainError::InvalidChallenge(
                "stake amount must be a positive number".to_string(),
            ));
        }
        if self.duration_hours < 1 {
            return Err(DomainError::InvalidChallenge(
                "duration must be at least one hour".to_string(),
            ));
        }
        if self.duration_hours > MAX_DURATION_HOURS {
            return Err(DomainError::InvalidChallenge(format!(
                "duration must be at most {} hours",
                MAX_DURATION_HOURS
            )));
        }
        if self.max_participants == Some(0) {
            return Err(DomainError::InvalidChallenge(
                "max participants must be at least one".to_string(),
            ));
        }
        Ok(())
    }

    /// Non-blank rule lines
    pub fn rule_lines(&self) -> Vec<String> {
        self.rules
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build the challenge this form describes. `id` is assigned by the board.
    pub fn into_challenge(
        self,
        id: String,
        created_by: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Challenge> {
        self.validate()?;
        let rules = self.rule_lines();
        let ends_at = now
            .checked_add_signed(Duration::hours(i64::from(self.duration_hours)))
            .ok_or_else(|| DomainError::InvalidChallenge("end date out of range".to_string()))?;

        Ok(Challenge {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            stake_amount: self.stake_amount,
            stake_currency: self.stake_currency,
            duration: format!("{} hours", self.duration_hours),
            duration_hours: self.duration_hours,
            participants: 0,
            completed: 0,
            total_pot: 0.0,
            created_by: created_by.to_string(),
            started_at: now,
            ends_at,
            category: self.category,
            difficulty: self.difficulty,
            is_active: true,
            rules,
            photos: Vec::new(),
            max_participants: self.max_participants,
            tags: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ChallengeForm {
        ChallengeForm {
            title: "Sunset walk".to_string(),
            description: "Walk until the sun is down".to_string(),
            stake_amount: 5.0,
            stake_currency: Currency::Xp,
            duration_hours: 3,
            category: ChallengeCategory::Outdoor,
            difficulty: Difficulty::Easy,
            rules: "No phone\n\n  Bring water  \n".to_string(),
            max_participants: None,
        }
    }

    #[test]
    fn test_into_challenge() {
        let now = Utc::now();
        let challenge = form().into_challenge("c1".to_string(), "alice", now).unwrap();

        assert_eq!(challenge.duration, "3 hours");
        assert_eq!(challenge.ends_at, now + Duration::hours(3));
        assert_eq!(challenge.rules, vec!["No phone", "Bring water"]);
        assert_eq!(challenge.participants, 0);
        assert!(challenge.is_active);
    }

    #[test]
    fn test_validation() {
        let mut bad = form();
        bad.title = "   ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.stake_amount = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.duration_hours = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_overlong_duration_rejected() {
        let long: ChallengeForm = serde_json::from_value(serde_json::json!({
            "title": "Walk",
            "description": "Go outside",
            "stake_amount": 5.0,
            "duration_hours": 4_000_000_000u32
        }))
        .unwrap();
        assert!(matches!(
            long.into_challenge("c2".to_string(), "alice", Utc::now()),
            Err(DomainError::InvalidChallenge(_))
        ));

        let mut year = form();
        year.duration_hours = MAX_DURATION_HOURS;
        assert!(year.validate().is_ok());
        year.duration_hours = MAX_DURATION_HOURS + 1;
        assert!(year.validate().is_err());
    }

    #[test]
    fn test_defaults_from_json() {
        let form: ChallengeForm = serde_json::from_str(
            r#"{"title":"t","description":"d","stake_amount":1,"duration_hours":1}"#,
        )
        .unwrap();
        assert_eq!(form.stake_currency, Currency::Xp);
        assert_eq!(form.category, ChallengeCategory::Outdoor);
        assert!(form.rule_lines().is_empty());
    }
}
