//! Wallet Connection Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{BalanceLine, ConnectRequest, WalletResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::format::{format_address, format_crypto, format_currency, format_usd};
use crate::wallet::WalletState;
use crate::websocket::WsEvent;

impl From<WalletState> for WalletResponse {
    fn from(state: WalletState) -> Self {
        let balances = state
            .balance
            .iter()
            .map(|(currency, amount)| BalanceLine {
                currency: *currency,
                amount: *amount,
                display: format_crypto(*amount, currency.symbol()),
                usd: format_usd(*amount, currency.symbol()),
            })
            .collect();

        Self {
            is_connected: state.is_connected,
            is_connecting: state.is_connecting,
            short_address: state.address.as_deref().map(format_address),
            total_usd: format_currency(state.total_usd(), "USD"),
            address: state.address,
            balances,
        }
    }
}

/// GET /api/v1/wallet
pub async fn get_wallet(State(state): State<Arc<AppState>>) -> Json<WalletResponse> {
    Json(state.connection.state().await.into())
}

/// POST /api/v1/wallet/connect
///
/// Waits for the simulated provider handshake.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConnectRequest>,
) -> ApiResult<Json<WalletResponse>> {
    let wallet = state.connection.connect(request.provider).await?;
    state.ws_hub.publish(WsEvent::wallet(wallet.clone())).await;
    Ok(Json(wallet.into()))
}

/// POST /api/v1/wallet/disconnect
pub async fn disconnect(State(state): State<Arc<AppState>>) -> Json<WalletResponse> {
    let wallet = state.connection.disconnect().await;
    state.ws_hub.publish(WsEvent::wallet(wallet.clone())).await;
    Json(wallet.into())
}
