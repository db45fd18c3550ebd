//! Stake ledger
//!
//! Open stakes keyed by challenge id. When a path is configured the ledger is
//! a pretty-printed JSON object on disk; otherwise it lives in memory only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::error::WalletResult;
use crate::domain::Currency;

/// File name of the ledger inside the data directory
pub const LEDGER_FILE: &str = "touchgrass_stakes.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// A recorded stake
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StakeTransaction {
    pub id: String,
    pub amount: f64,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

#[derive(Debug, Default)]
pub struct StakeLedger {
    path: Option<PathBuf>,
    stakes: BTreeMap<String, StakeTransaction>,
}

impl StakeLedger {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed ledger. A missing file is an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> WalletResult<Self> {
        let path = path.into();
        let stakes = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), stakes = stakes.len(), "Loaded stake ledger");
        Ok(Self {
            path: Some(path),
            stakes,
        })
    }

    /// Write the ledger to disk. No-op for in-memory ledgers.
    pub fn save(&self) -> WalletResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.stakes)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, challenge_id: &str) -> Option<&StakeTransaction> {
        self.stakes.get(challenge_id)
    }

    pub fn insert(&mut self, challenge_id: impl Into<String>, stake: StakeTransaction) {
        self.stakes.insert(challenge_id.into(), stake);
    }

    pub fn remove(&mut self, challenge_id: &str) -> Option<StakeTransaction> {
        self.stakes.remove(challenge_id)
    }

    pub fn all(&self) -> impl Iterator<Item = (&String, &StakeTransaction)> {
        self.stakes.iter()
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stake(id: &str, amount: f64) -> StakeTransaction {
        StakeTransaction {
            id: id.to_string(),
            amount,
            currency: Currency::Sol,
            timestamp: Utc::now(),
            status: TransactionStatus::Confirmed,
        }
    }

    #[test]
    fn test_persists_across_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(LEDGER_FILE);

        let mut ledger = StakeLedger::load(&path).unwrap();
        assert!(ledger.is_empty());
        ledger.insert("7", stake("stake_1", 12.0));
        ledger.save().unwrap();

        let reloaded = StakeLedger::load(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("7").unwrap().amount, 12.0);
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let mut ledger = StakeLedger::in_memory();
        ledger.insert("1", stake("stake_1", 5.0));
        ledger.save().unwrap();
        assert!(ledger.path().is_none());
        assert!(ledger.remove("1").is_some());
        assert!(ledger.remove("1").is_none());
    }
}
