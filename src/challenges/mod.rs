//! Challenge catalogue
//!
//! - **board**: listing, joining, photos, votes, comments
//! - **form**: the challenge creation form

pub mod board;
pub mod form;

pub use board::{ChallengeBoard, ChallengeFilter, POPULAR_LIMIT};
pub use form::ChallengeForm;
