//! API Routes
//!
//! Route handlers organized by functionality.

pub mod challenges;
pub mod health;
pub mod me;
pub mod social;
pub mod stakes;
pub mod users;
pub mod wallet;

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// Acting as the logged-in user needs a connected wallet
pub(crate) async fn require_wallet(state: &AppState) -> ApiResult<()> {
    state.connection.require_connected().await?;
    Ok(())
}
