//! Current-user session

pub mod user_session;

pub use user_session::{UserSession, UserSettings, Verification};
