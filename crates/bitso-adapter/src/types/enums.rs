/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "queued")]
    Queued,
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "partially filled", alias = "partial-fill", alias = "partially_filled")]
    PartiallyFilled,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled", alias = "canceled")]
    Cancelled,
}

/// Ledger filter, each kind maps to its own path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Trades,
    Fees,
    Fundings,
    Withdrawals,
}

impl LedgerKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            LedgerKind::Trades => "trades",
            LedgerKind::Fees => "fees",
            LedgerKind::Fundings => "fundings",
            LedgerKind::Withdrawals => "withdrawals",
        }
    }
}

/// Crypto withdrawal kinds supported by the address-based endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyWithdrawal {
    Bitcoin,
    Ether,
}

impl CurrencyWithdrawal {
    pub fn path_segment(self) -> &'static str {
        match self {
            CurrencyWithdrawal::Bitcoin => "bitcoin_withdrawal",
            CurrencyWithdrawal::Ether => "ether_withdrawal",
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            CurrencyWithdrawal::Bitcoin => "btc",
            CurrencyWithdrawal::Ether => "eth",
        }
    }
}
