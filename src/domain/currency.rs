//! Currencies accepted for stakes and their USD conversion rates

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DomainError;

/// A currency a stake can be denominated in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eth,
    Usdc,
    Usdt,
    Btc,
    /// Used by the staking simulator
    Sol,
    /// Experience points, the default for user-created challenges
    Xp,
}

impl Currency {
    /// Currencies the connected wallet reports balances for
    pub fn wallet_currencies() -> &'static [Currency] {
        &[Currency::Eth, Currency::Usdc, Currency::Usdt, Currency::Btc]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eth => "ETH",
            Currency::Usdc => "USDC",
            Currency::Usdt => "USDT",
            Currency::Btc => "BTC",
            Currency::Sol => "SOL",
            Currency::Xp => "XP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eth => "Ethereum",
            Currency::Usdc => "USD Coin",
            Currency::Usdt => "Tether",
            Currency::Btc => "Bitcoin",
            Currency::Sol => "Solana",
            Currency::Xp => "Experience Points",
        }
    }

    /// USD value of one unit. Currencies without a quoted rate count as 1.
    pub fn usd_rate(&self) -> f64 {
        match self {
            Currency::Eth => 2400.0,
            Currency::Usdc | Currency::Usdt => 1.0,
            Currency::Btc => 65000.0,
            Currency::Sol | Currency::Xp => 1.0,
        }
    }

    /// Look up a rate by symbol, falling back to 1 for anything unknown
    pub fn usd_rate_for(symbol: &str) -> f64 {
        symbol
            .parse::<Currency>()
            .map(|c| c.usd_rate())
            .unwrap_or(1.0)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ETH" => Ok(Currency::Eth),
            "USDC" => Ok(Currency::Usdc),
            "USDT" => Ok(Currency::Usdt),
            "BTC" => Ok(Currency::Btc),
            "SOL" => Ok(Currency::Sol),
            "XP" => Ok(Currency::Xp),
            other => Err(DomainError::UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("usdc".parse::<Currency>().unwrap(), Currency::Usdc);
        assert_eq!(" Eth ".parse::<Currency>().unwrap(), Currency::Eth);
        assert!("DOGE".parse::<Currency>().is_err());
    }

    #[test]
    fn test_usd_rates() {
        assert_eq!(Currency::Btc.usd_rate(), 65000.0);
        assert_eq!(Currency::usd_rate_for("ETH"), 2400.0);
        assert_eq!(Currency::usd_rate_for("???"), 1.0);
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Currency::Usdt).unwrap();
        assert_eq!(json, "\"USDT\"");
    }
}
