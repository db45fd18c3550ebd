//! Simulated wallet connection
//!
//! Connecting to any supported provider waits a fixed delay and then reports
//! a fixed address with fixed balances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::RwLock;

use super::error::{WalletError, WalletResult};
use crate::domain::Currency;

pub const MOCK_ADDRESS: &str = "0x1234567890123456789012345678901234567890";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletProvider {
    Metamask,
    Walletconnect,
    Coinbase,
}

impl WalletProvider {
    pub fn all() -> &'static [WalletProvider] {
        &[
            WalletProvider::Metamask,
            WalletProvider::Walletconnect,
            WalletProvider::Coinbase,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletProvider::Metamask => "MetaMask",
            WalletProvider::Walletconnect => "WalletConnect",
            WalletProvider::Coinbase => "Coinbase Wallet",
        }
    }
}

impl FromStr for WalletProvider {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metamask" => Ok(WalletProvider::Metamask),
            "walletconnect" => Ok(WalletProvider::Walletconnect),
            "coinbase" => Ok(WalletProvider::Coinbase),
            other => Err(WalletError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletState {
    pub is_connected: bool,
    pub address: Option<String>,
    pub balance: BTreeMap<Currency, f64>,
    pub is_connecting: bool,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self {
            is_connected: false,
            address: None,
            balance: Currency::wallet_currencies()
                .iter()
                .map(|c| (*c, 0.0))
                .collect(),
            is_connecting: false,
        }
    }

    fn connected() -> Self {
        let balance = [
            (Currency::Eth, 2.5643),
            (Currency::Usdc, 1250.75),
            (Currency::Usdt, 800.00),
            (Currency::Btc, 0.0234),
        ]
        .into_iter()
        .collect();

        Self {
            is_connected: true,
            address: Some(MOCK_ADDRESS.to_string()),
            balance,
            is_connecting: false,
        }
    }

    /// Sum of all balances in USD
    pub fn total_usd(&self) -> f64 {
        self.balance
            .iter()
            .map(|(currency, amount)| amount * currency.usd_rate())
            .sum()
    }
}

pub struct WalletConnection {
    delay: Duration,
    state: RwLock<WalletState>,
}

impl WalletConnection {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: RwLock::new(WalletState::disconnected()),
        }
    }

    pub async fn state(&self) -> WalletState {
        self.state.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.is_connected
    }

    /// Fails with `NotConnected` unless a wallet is connected
    pub async fn require_connected(&self) -> WalletResult<()> {
        if self.is_connected().await {
            Ok(())
        } else {
            Err(WalletError::NotConnected)
        }
    }

    pub async fn connect(&self, provider: WalletProvider) -> WalletResult<WalletState> {
        {
            let mut state = self.state.write().await;
            if state.is_connected {
                return Ok(state.clone());
            }
            if state.is_connecting {
                return Err(WalletError::ConnectionInProgress);
            }
            state.is_connecting = true;
        }

        tracing::info!(provider = provider.display_name(), "Connecting wallet");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut state = self.state.write().await;
        *state = WalletState::connected();
        tracing::info!(address = MOCK_ADDRESS, "Wallet connected");
        Ok(state.clone())
    }

    pub async fn disconnect(&self) -> WalletState {
        let mut state = self.state.write().await;
        *state = WalletState::disconnected();
        tracing::info!("Wallet disconnected");
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_provider_parse() {
        assert_eq!(
            "MetaMask".parse::<WalletProvider>().unwrap(),
            WalletProvider::Metamask
        );
        assert!(matches!(
            "phantom".parse::<WalletProvider>(),
            Err(WalletError::UnknownProvider(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let connection = WalletConnection::new(Duration::ZERO);
        assert!(connection.require_connected().await.is_err());

        let state = connection.connect(WalletProvider::Coinbase).await.unwrap();
        assert!(state.is_connected);
        assert_eq!(state.address.as_deref(), Some(MOCK_ADDRESS));
        assert_eq!(state.balance[&Currency::Usdc], 1250.75);
        assert_eq!(state.balance[&Currency::Btc], 0.0234);

        // Connecting again keeps the current state
        let again = connection.connect(WalletProvider::Metamask).await.unwrap();
        assert_eq!(again, state);

        let state = connection.disconnect().await;
        assert!(!state.is_connected);
        assert!(state.address.is_none());
        assert!(state.balance.values().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_concurrent_connect_is_rejected() {
        let connection = Arc::new(WalletConnection::new(Duration::from_millis(200)));

        let first = {
            let connection = connection.clone();
            tokio::spawn(async move { connection.connect(WalletProvider::Metamask).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(connection.state().await.is_connecting);
        assert!(matches!(
            connection.connect(WalletProvider::Metamask).await,
            Err(WalletError::ConnectionInProgress)
        ));

        assert!(first.await.unwrap().unwrap().is_connected);
    }
}
