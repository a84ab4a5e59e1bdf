/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - immutable snapshots built from payload JSON
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{OrderStatus, OrderType, Side};
use super::serde_helpers::{decimal, decimal_option, u64_flexible};

/// Trading limits for an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub book: String,
    #[serde(with = "decimal")]
    pub minimum_amount: Decimal,
    #[serde(with = "decimal")]
    pub maximum_amount: Decimal,
    #[serde(with = "decimal")]
    pub minimum_price: Decimal,
    #[serde(with = "decimal")]
    pub maximum_price: Decimal,
    #[serde(with = "decimal")]
    pub minimum_value: Decimal,
    #[serde(with = "decimal")]
    pub maximum_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub book: String,
    #[serde(with = "decimal")]
    pub volume: Decimal,
    #[serde(with = "decimal")]
    pub high: Decimal,
    #[serde(with = "decimal")]
    pub last: Decimal,
    #[serde(with = "decimal")]
    pub low: Decimal,
    #[serde(with = "decimal")]
    pub vwap: Decimal,
    #[serde(with = "decimal")]
    pub ask: Decimal,
    #[serde(with = "decimal")]
    pub bid: Decimal,
    pub created_at: String,
    #[serde(default, with = "decimal_option", skip_serializing_if = "Option::is_none")]
    pub change_24: Option<Decimal>,
}

/// One resting order (or aggregated price level) in the book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub book: String,
    #[serde(with = "decimal")]
    pub price: Decimal,
    #[serde(with = "decimal")]
    pub amount: Decimal,
    /// Present only for non-aggregated books
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<PriceLevel>,
    pub bids: Vec<PriceLevel>,
    pub updated_at: String,
    #[serde(with = "u64_flexible")]
    pub sequence: u64,
}

impl OrderBook {
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }
}

/// Public trade from the book's trade history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrade {
    pub book: String,
    pub created_at: String,
    #[serde(with = "decimal")]
    pub amount: Decimal,
    pub maker_side: Side,
    #[serde(with = "decimal")]
    pub price: Decimal,
    #[serde(with = "u64_flexible")]
    pub tid: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountStatus {
    pub client_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub status: String,
    #[serde(with = "decimal")]
    pub daily_limit: Decimal,
    #[serde(with = "decimal")]
    pub monthly_limit: Decimal,
    #[serde(with = "decimal")]
    pub daily_remaining: Decimal,
    #[serde(with = "decimal")]
    pub monthly_remaining: Decimal,
    #[serde(default)]
    pub cellphone_number: String,
    #[serde(default)]
    pub cellphone_number_stored: String,
    #[serde(default)]
    pub email_stored: String,
    #[serde(default)]
    pub official_id: String,
    #[serde(default)]
    pub proof_of_residency: String,
    #[serde(default)]
    pub signed_contract: String,
    #[serde(default)]
    pub origin_of_funds: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    #[serde(with = "decimal")]
    pub total: Decimal,
    #[serde(with = "decimal")]
    pub locked: Decimal,
    #[serde(with = "decimal")]
    pub available: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub balances: Vec<Balance>,
}

impl Balances {
    /// Balance for `currency`, matched case-insensitively
    pub fn get(&self, currency: &str) -> Option<&Balance> {
        self.balances
            .iter()
            .find(|balance| balance.currency.eq_ignore_ascii_case(currency))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFee {
    pub book: String,
    #[serde(with = "decimal")]
    pub fee_decimal: Decimal,
    #[serde(with = "decimal")]
    pub fee_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    pub fees: Vec<BookFee>,
    /// Flat withdrawal fee per currency
    #[serde(default)]
    pub withdrawal_fees: BTreeMap<String, Decimal>,
}

impl Fees {
    pub fn for_book(&self, book: &str) -> Option<&BookFee> {
        self.fees.iter().find(|fee| fee.book == book)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceUpdate {
    pub currency: String,
    #[serde(with = "decimal")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub eid: String,
    pub operation: String,
    pub created_at: String,
    #[serde(default)]
    pub balance_updates: Vec<BalanceUpdate>,
    #[serde(default)]
    pub details: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub wid: String,
    pub status: String,
    pub created_at: String,
    pub currency: String,
    pub method: String,
    #[serde(with = "decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub details: Value,
}

/// Deposit into the account.
///
/// `details` is method-specific and has been observed as both an object and
/// an array, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funding {
    pub fid: String,
    pub status: String,
    pub created_at: String,
    pub currency: String,
    pub method: String,
    #[serde(with = "decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub details: Value,
}

/// Fill belonging to the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrade {
    pub book: String,
    #[serde(with = "decimal")]
    pub major: Decimal,
    #[serde(with = "decimal")]
    pub minor: Decimal,
    #[serde(with = "decimal")]
    pub price: Decimal,
    pub created_at: String,
    #[serde(with = "decimal")]
    pub fees_amount: Decimal,
    pub fees_currency: String,
    #[serde(with = "u64_flexible")]
    pub tid: u64,
    pub oid: String,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub oid: String,
    pub book: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    #[serde(default, with = "decimal_option")]
    pub original_amount: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub unfilled_amount: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub original_value: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub price: Option<Decimal>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Legacy transfer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, with = "decimal_option")]
    pub btc_amount: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub btc_pending: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub btc_received: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub currency_amount: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub currency_fees: Option<Decimal>,
    #[serde(default, with = "decimal_option")]
    pub currency_settled: Option<Decimal>,
    #[serde(default)]
    pub confirmation_code: Option<String>,
    #[serde(default)]
    pub expires_epoch: Option<i64>,
    #[serde(default)]
    pub payment_outlet_id: Option<String>,
    #[serde(default)]
    pub qr_img_uri: Option<String>,
    #[serde(default)]
    pub required_confirmation_count: Option<u32>,
    #[serde(default)]
    pub user_uri: Option<String>,
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub fields: Value,
}
