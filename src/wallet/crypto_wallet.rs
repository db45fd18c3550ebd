//! Simulated staking wallet
//!
//! Holds a token balance, records stakes in the [`StakeLedger`] and settles
//! them with a payout or a loss. Every call sleeps for a configurable latency
//! to mimic a chain round trip.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;

use super::error::{WalletError, WalletResult};
use super::ledger::{StakeLedger, StakeTransaction, TransactionStatus};
use crate::domain::Currency;
use crate::staking::{payout_for, validate_stake_amount};

#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub starting_balance: f64,
    /// Delay applied to balance reads
    pub read_latency: Duration,
    /// Delay applied to stakes and payouts
    pub transaction_latency: Duration,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: 100.0,
            read_latency: Duration::from_millis(500),
            transaction_latency: Duration::from_millis(1000),
        }
    }
}

impl WalletConfig {
    /// No simulated latency
    pub fn instant() -> Self {
        Self {
            read_latency: Duration::ZERO,
            transaction_latency: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// Outcome of settling a stake
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoutResult {
    pub success: bool,
    pub amount: f64,
    pub transaction_id: String,
}

struct WalletInner {
    balance: f64,
    ledger: StakeLedger,
}

pub struct CryptoWallet {
    config: WalletConfig,
    inner: RwLock<WalletInner>,
}

impl CryptoWallet {
    pub fn new(config: WalletConfig, ledger: StakeLedger) -> Self {
        let balance = config.starting_balance;
        Self {
            config,
            inner: RwLock::new(WalletInner { balance, ledger }),
        }
    }

    pub async fn balance(&self) -> f64 {
        simulate_latency(self.config.read_latency).await;
        self.inner.read().await.balance
    }

    /// The open stake for a challenge, if any
    pub async fn stake_for(&self, challenge_id: &str) -> Option<StakeTransaction> {
        self.inner.read().await.ledger.get(challenge_id).cloned()
    }

    /// Debit `amount` and record it against `challenge_id`
    pub async fn stake_tokens(
        &self,
        amount: f64,
        challenge_id: &str,
    ) -> WalletResult<StakeTransaction> {
        validate_stake_amount(amount)?;
        simulate_latency(self.config.transaction_latency).await;

        let mut inner = self.inner.write().await;
        if inner.ledger.get(challenge_id).is_some() {
            return Err(WalletError::StakeAlreadyOpen(challenge_id.to_string()));
        }
        if amount > inner.balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: inner.balance,
            });
        }

        let transaction = StakeTransaction {
            id: transaction_id("stake"),
            amount,
            currency: Currency::Sol,
            timestamp: Utc::now(),
            status: TransactionStatus::Confirmed,
        };

        inner.ledger.insert(challenge_id, transaction.clone());
        if let Err(e) = inner.ledger.save() {
            inner.ledger.remove(challenge_id);
            return Err(e);
        }
        inner.balance -= amount;

        tracing::info!(
            challenge_id = %challenge_id,
            amount,
            transaction_id = %transaction.id,
            "Stake recorded"
        );
        Ok(transaction)
    }

    /// Settle the stake on `challenge_id`. Success pays `stake * 1.2`, failure
    /// pays nothing. The stake is removed from the ledger either way.
    pub async fn process_payout(
        &self,
        challenge_id: &str,
        success: bool,
    ) -> WalletResult<PayoutResult> {
        simulate_latency(self.config.transaction_latency).await;

        let mut inner = self.inner.write().await;
        let stake = inner
            .ledger
            .remove(challenge_id)
            .ok_or_else(|| WalletError::NoStakeFound(challenge_id.to_string()))?;
        if let Err(e) = inner.ledger.save() {
            inner.ledger.insert(challenge_id, stake);
            return Err(e);
        }

        let amount = payout_for(stake.amount, success);
        inner.balance += amount;

        let result = PayoutResult {
            success,
            amount,
            transaction_id: transaction_id(if success { "payout" } else { "loss" }),
        };

        tracing::info!(
            challenge_id = %challenge_id,
            success,
            amount,
            transaction_id = %result.transaction_id,
            "Stake settled"
        );
        Ok(result)
    }

    pub async fn open_stakes(&self) -> Vec<(String, StakeTransaction)> {
        self.inner
            .read()
            .await
            .ledger
            .all()
            .map(|(id, stake)| (id.clone(), stake.clone()))
            .collect()
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// `<prefix>_<unix ms>_<9 random chars>`
fn transaction_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn wallet() -> CryptoWallet {
        CryptoWallet::new(WalletConfig::instant(), StakeLedger::in_memory())
    }

    #[tokio::test]
    async fn test_stake_debits_balance() {
        let wallet = wallet();
        let tx = wallet.stake_tokens(10.0, "1").await.unwrap();

        assert!(tx.id.starts_with("stake_"));
        assert_eq!(tx.currency, Currency::Sol);
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert_eq!(wallet.balance().await, 90.0);
    }

    #[tokio::test]
    async fn test_stake_rejections() {
        let wallet = wallet();
        assert!(matches!(
            wallet.stake_tokens(0.5, "1").await,
            Err(WalletError::InvalidStake(_))
        ));

        wallet.stake_tokens(50.0, "1").await.unwrap();
        assert!(matches!(
            wallet.stake_tokens(5.0, "1").await,
            Err(WalletError::StakeAlreadyOpen(_))
        ));

        wallet.stake_tokens(45.0, "2").await.unwrap();
        assert!(matches!(
            wallet.stake_tokens(10.0, "3").await,
            Err(WalletError::InsufficientBalance { .. })
        ));
        assert_eq!(wallet.balance().await, 5.0);
    }

    #[tokio::test]
    async fn test_successful_payout() {
        let wallet = wallet();
        wallet.stake_tokens(10.0, "1").await.unwrap();

        let payout = wallet.process_payout("1", true).await.unwrap();
        assert!(payout.success);
        assert!((payout.amount - 12.0).abs() < 1e-9);
        assert!(payout.transaction_id.starts_with("payout_"));
        assert!((wallet.balance().await - 102.0).abs() < 1e-9);

        // Settled stakes cannot be paid twice
        assert!(matches!(
            wallet.process_payout("1", true).await,
            Err(WalletError::NoStakeFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_payout_loses_stake() {
        let wallet = wallet();
        wallet.stake_tokens(20.0, "4").await.unwrap();

        let payout = wallet.process_payout("4", false).await.unwrap();
        assert!(!payout.success);
        assert_eq!(payout.amount, 0.0);
        assert!(payout.transaction_id.starts_with("loss_"));
        assert_eq!(wallet.balance().await, 80.0);
        assert!(wallet.stake_for("4").await.is_none());
    }

    #[tokio::test]
    async fn test_stakes_persist_to_ledger_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stakes.json");

        let wallet = CryptoWallet::new(WalletConfig::instant(), StakeLedger::load(&path).unwrap());
        wallet.stake_tokens(5.0, "9").await.unwrap();

        let ledger = StakeLedger::load(&path).unwrap();
        assert_eq!(ledger.get("9").unwrap().amount, 5.0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_stake_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stakes.json");

        let wallet = CryptoWallet::new(WalletConfig::instant(), StakeLedger::load(&path).unwrap());
        wallet.stake_tokens(10.0, "1").await.unwrap();

        // A directory in place of the file makes every write fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            wallet.process_payout("1", true).await,
            Err(WalletError::Io(_))
        ));
        assert_eq!(wallet.stake_for("1").await.unwrap().amount, 10.0);
        assert_eq!(wallet.balance().await, 90.0);

        std::fs::remove_dir(&path).unwrap();
        let payout = wallet.process_payout("1", true).await.unwrap();
        assert!((payout.amount - 12.0).abs() < 1e-9);
    }
}
