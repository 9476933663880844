//! Price-time priority matching.
//!
//! [`match_order`] runs one incoming order against the opposite side of the
//! book, emitting trades at the resting order's price, and rests whatever is
//! left. Run it under a single exclusive borrow of the book so that nothing can
//! queue ahead of the remainder.

use crate::error::{BookError, Result};
use crate::execution::Trade;
use crate::order_book::OrderBook;
use crate::types::{Order, Side};
use rust_decimal::Decimal;

/// Result of matching one incoming order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Trades in execution order.
    pub trades: Vec<Trade>,
    /// Unfilled part of the incoming order, now resting on the book.
    pub rested: Option<Order>,
}

impl MatchOutcome {
    /// Total executed amount across all trades.
    pub fn filled_amount(&self) -> Decimal {
        self.trades.iter().map(|t| t.amount).sum()
    }

    pub fn rested_amount(&self) -> Decimal {
        self.rested.as_ref().map_or(Decimal::ZERO, |o| o.amount)
    }
}

/// Whether an incoming order on `side` at `limit` may trade with a resting order at `resting_price`.
fn crosses(side: Side, limit: Decimal, resting_price: Decimal) -> bool {
    match side {
        Side::Buy => resting_price <= limit,
        Side::Sell => resting_price >= limit,
    }
}

/// Matches `order` against `book` and rests the remainder under the same id and price.
///
/// Fails with [`BookError::DuplicateOrderId`] before touching the book if the
/// incoming id is already resting. Price/amount validation is the caller's job.
pub fn match_order(book: &mut OrderBook, order: &Order) -> Result<MatchOutcome> {
    if book.contains(&order.id) {
        return Err(BookError::DuplicateOrderId(order.id.clone()));
    }

    let opposite = order.side.opposite();
    let mut remaining = order.amount;
    let mut trades = Vec::new();

    while remaining > Decimal::ZERO {
        let Some(resting) = book.head_mut(opposite) else {
            break;
        };
        // The head is the best price on that side; if it doesn't cross, nothing behind it will.
        if !crosses(order.side, order.price, resting.price) {
            break;
        }
        let executed = remaining.min(resting.amount);
        trades.push(Trade::between(order, resting, executed));
        remaining -= executed;
        resting.amount -= executed;
        if resting.amount.is_zero() {
            book.pop_head(opposite);
        }
    }

    let rested = if remaining > Decimal::ZERO {
        let remainder = Order {
            id: order.id.clone(),
            price: order.price,
            amount: remaining,
            side: order.side,
        };
        book.insert(remainder.clone())?;
        Some(remainder)
    } else {
        None
    };

    Ok(MatchOutcome { trades, rested })
}
