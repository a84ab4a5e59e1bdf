/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - request bodies and their input contracts
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderType, Side};
use crate::http::{BitsoError, Result};

/// Body of `POST /api/v3/orders`.
///
/// Exactly one of `major` / `minor` must be set. Limit orders carry a price,
/// market orders do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub book: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl PlaceOrderRequest {
    pub fn new(book: impl Into<String>, side: Side, order_type: OrderType) -> Self {
        Self {
            book: book.into().to_lowercase(),
            side,
            order_type,
            major: None,
            minor: None,
            price: None,
        }
    }

    /// Limit order sized in the major currency
    pub fn limit(book: impl Into<String>, side: Side, major: Decimal, price: Decimal) -> Self {
        Self::new(book, side, OrderType::Limit)
            .with_major(major)
            .with_price(price)
    }

    /// Market order sized in the major currency
    pub fn market(book: impl Into<String>, side: Side, major: Decimal) -> Self {
        Self::new(book, side, OrderType::Market).with_major(major)
    }

    #[must_use]
    pub fn with_major(mut self, major: Decimal) -> Self {
        self.major = Some(major);
        self
    }

    #[must_use]
    pub fn with_minor(mut self, minor: Decimal) -> Self {
        self.minor = Some(minor);
        self
    }

    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_text("book", &self.book)?;

        match (self.major, self.minor) {
            (Some(_), Some(_)) => {
                return Err(BitsoError::invalid_input(
                    "an order takes either major or minor, not both",
                ));
            }
            (None, None) => {
                return Err(BitsoError::invalid_input(
                    "an order needs a major or minor amount",
                ));
            }
            (Some(amount), None) | (None, Some(amount)) => require_positive("amount", amount)?,
        }

        match (self.order_type, self.price) {
            (OrderType::Market, Some(_)) => Err(BitsoError::invalid_input(
                "market orders do not take a price",
            )),
            (OrderType::Limit, None) => Err(BitsoError::invalid_input(
                "limit orders require a price",
            )),
            (OrderType::Limit, Some(price)) => require_positive("price", price),
            (OrderType::Market, None) => Ok(()),
        }
    }
}

/// Body of the bitcoin / ether withdrawal endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyWithdrawalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub address: String,
}

impl CurrencyWithdrawalRequest {
    pub fn new(amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            amount,
            address: address.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("amount", self.amount)?;
        require_text("address", &self.address)
    }
}

/// SPEI transfer to a Mexican bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeiWithdrawalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub recipient_given_names: String,
    pub recipient_family_names: String,
    pub clabe: String,
    pub notes_ref: String,
    pub numeric_ref: String,
}

impl SpeiWithdrawalRequest {
    pub fn validate(&self) -> Result<()> {
        require_positive("amount", self.amount)?;
        require_text("recipient_given_names", &self.recipient_given_names)?;
        require_text("recipient_family_names", &self.recipient_family_names)?;
        require_text("clabe", &self.clabe)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebitCardWithdrawalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub recipient_given_names: String,
    pub recipient_family_names: String,
    pub card_number: String,
    pub bank_code: String,
}

impl DebitCardWithdrawalRequest {
    pub fn validate(&self) -> Result<()> {
        require_positive("amount", self.amount)?;
        require_text("recipient_given_names", &self.recipient_given_names)?;
        require_text("recipient_family_names", &self.recipient_family_names)?;
        require_text("card_number", &self.card_number)?;
        require_text("bank_code", &self.bank_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneWithdrawalRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub recipient_given_names: String,
    pub recipient_family_names: String,
    pub phone_number: String,
    pub bank_code: String,
}

impl PhoneWithdrawalRequest {
    pub fn validate(&self) -> Result<()> {
        require_positive("amount", self.amount)?;
        require_text("recipient_given_names", &self.recipient_given_names)?;
        require_text("recipient_family_names", &self.recipient_family_names)?;
        require_text("phone_number", &self.phone_number)?;
        require_text("bank_code", &self.bank_code)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BitsoError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(BitsoError::invalid_input(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}
