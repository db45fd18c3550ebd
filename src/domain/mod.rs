//! Domain Model
//!
//! Plain display records shared by every other module:
//!
//! - **types**: users, challenges, photos, participation records, feed events
//! - **currency**: stake currencies and USD rates
//! - **error**: user-facing domain errors

pub mod currency;
pub mod error;
pub mod types;

pub use currency::Currency;
pub use error::{DomainError, DomainResult};
pub use types::{
    Achievement, Activity, ActivityKind, Challenge, ChallengeCategory, ChallengePhoto,
    ChallengeStatus, Comment, Difficulty, PhotoVote, Rarity, User, UserChallenge,
};
