//! Wallet error types

use thiserror::Error;

use crate::domain::DomainError;

/// Errors raised by the simulated wallet and its stake ledger
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Insufficient balance: requested {requested:.2}, available {available:.2}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("{0}")]
    InvalidStake(String),

    #[error("No stake found for challenge {0}")]
    NoStakeFound(String),

    #[error("A stake is already open for challenge {0}")]
    StakeAlreadyOpen(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wallet connection already in progress")]
    ConnectionInProgress,

    #[error("Unknown wallet provider: {0}")]
    UnknownProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Serialization(err.to_string())
    }
}

impl From<DomainError> for WalletError {
    fn from(err: DomainError) -> Self {
        WalletError::InvalidStake(err.to_string())
    }
}

pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::InsufficientBalance {
            requested: 150.0,
            available: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 150.00, available 100.00"
        );
    }
}
