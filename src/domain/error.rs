//! Domain error types
//!
//! Errors raised by the challenge board, the user session and the
//! staking rules. All of them are user-facing conditions.

use thiserror::Error;

/// Errors that can occur while operating on the domain model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Stake amount outside the allowed range
    #[error("{0}")]
    InvalidStake(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Challenge form or other user input failed validation
    #[error("Invalid challenge: {0}")]
    InvalidChallenge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Already joined challenge {0}")]
    AlreadyJoined(String),

    #[error("Not participating in challenge {0}")]
    NotJoined(String),

    /// A status change that the current state does not allow
    #[error("Cannot {action} a challenge that is {from}")]
    InvalidTransition { from: String, action: String },

    #[error("A proof photo is required before submitting")]
    PhotoRequired,

    #[error("Challenge {0} is full")]
    ChallengeFull(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown leaderboard metric: {0}")]
    UnknownMetric(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::ChallengeNotFound("42".to_string());
        assert_eq!(err.to_string(), "Challenge not found: 42");

        let err = DomainError::InvalidTransition {
            from: "completed".to_string(),
            action: "forfeit".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot forfeit a challenge that is completed");
    }
}
