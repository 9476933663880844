//! Core value types: [`Side`], [`OrderId`], and the resting-limit [`Order`].
//!
//! Price and amount are [`Decimal`] so that repeated partial fills reach an
//! exact zero instead of leaving a rounding residue on the book.

use rust_decimal::Decimal;
use std::fmt;

use crate::error::{BookError, Result};

/// Order identifier, unique within one book.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Fresh random identifier (UUID v4) for callers that don't supply one.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Order side. Wire form is `"BUY"` / `"SELL"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order on `self` matches against.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// Resting limit order.
///
/// Only `amount` (during matching) and `price`/`amount` (via modification)
/// change once the order is on the book.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub price: Decimal,
    pub amount: Decimal,
    pub side: Side,
}

impl Order {
    /// Validated order with a generated id.
    pub fn new(price: Decimal, amount: Decimal, side: Side) -> Result<Self> {
        Self::with_id(OrderId::generate(), price, amount, side)
    }

    /// Validated order with a caller-supplied id.
    pub fn with_id(id: impl Into<OrderId>, price: Decimal, amount: Decimal, side: Side) -> Result<Self> {
        let order = Self {
            id: id.into(),
            price,
            amount,
            side,
        };
        order.validate()?;
        Ok(order)
    }

    /// Fails with [`BookError::InvalidOrder`] unless price and amount are both positive.
    pub fn validate(&self) -> Result<()> {
        if self.price <= Decimal::ZERO || self.amount <= Decimal::ZERO {
            return Err(BookError::InvalidOrder);
        }
        Ok(())
    }

    pub fn is_buy(&self) -> bool {
        matches!(self.side, Side::Buy)
    }
}
