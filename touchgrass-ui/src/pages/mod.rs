//! Pages
//!
//! Top-level page components for each route.

pub mod challenge_detail;
pub mod dashboard;
pub mod landing;
pub mod leaderboards;
pub mod settings;
pub mod user_profile;

pub use challenge_detail::ChallengeDetail;
pub use dashboard::Dashboard;
pub use landing::Landing;
pub use leaderboards::Leaderboards;
pub use settings::Settings;
pub use user_profile::UserProfile;
