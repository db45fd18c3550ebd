//! Wallet simulation
//!
//! - **connection**: connect/disconnect to a mock wallet provider
//! - **crypto_wallet**: token balance, stakes and payouts
//! - **ledger**: open stakes, optionally persisted as JSON
//! - **error**: error types

pub mod connection;
pub mod crypto_wallet;
pub mod error;
pub mod ledger;

pub use connection::{WalletConnection, WalletProvider, WalletState, MOCK_ADDRESS};
pub use crypto_wallet::{CryptoWallet, PayoutResult, WalletConfig};
pub use error::{WalletError, WalletResult};
pub use ledger::{StakeLedger, StakeTransaction, TransactionStatus, LEDGER_FILE};
