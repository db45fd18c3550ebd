//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod activity_feed;
pub mod card;
pub mod challenge_grid;
pub mod create_challenge;
pub mod leaderboard;
pub mod loading;
pub mod nav;
pub mod photo_upload;
pub mod stake_flow;
pub mod toast;

pub use activity_feed::ActivityFeed;
pub use card::{Button, ButtonVariant, Card, Modal};
pub use challenge_grid::{ChallengeGrid, DifficultyBadge};
pub use create_challenge::CreateChallenge;
pub use leaderboard::Leaderboard;
pub use loading::{CardSkeleton, Loading};
pub use nav::Nav;
pub use photo_upload::PhotoUpload;
pub use stake_flow::StakeFlow;
pub use toast::Toast;
