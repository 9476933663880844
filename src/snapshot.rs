//! Aggregated, read-only view of the book by price level.

use rust_decimal::Decimal;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Order;

/// All resting orders on one side at one price.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderBookLevel {
    pub price: Decimal,
    pub total_amount: Decimal,
    pub order_count: usize,
}

impl OrderBookLevel {
    /// Aggregates one price level's queue. `None` for an empty queue.
    ///
    /// The total saturates at `Decimal::MAX`.
    pub(crate) fn from_queue<'a>(price: Decimal, orders: impl IntoIterator<Item = &'a Order>) -> Option<Self> {
        let mut total_amount = Decimal::ZERO;
        let mut order_count = 0;
        for order in orders {
            total_amount = total_amount.checked_add(order.amount).unwrap_or(Decimal::MAX);
            order_count += 1;
        }
        (order_count > 0).then_some(Self {
            price,
            total_amount,
            order_count,
        })
    }
}

/// Book state at one instant. Asks ascend in price, bids descend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookSnapshot {
    pub asks: Vec<OrderBookLevel>,
    pub bids: Vec<OrderBookLevel>,
    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn level_sums_amounts_and_counts_orders() {
        let orders = vec![
            Order::with_id("a", Decimal::from(100), Decimal::ONE, Side::Sell).unwrap(),
            Order::with_id("b", Decimal::from(100), Decimal::from(2), Side::Sell).unwrap(),
        ];
        let level = OrderBookLevel::from_queue(Decimal::from(100), &orders).unwrap();
        assert_eq!(level.total_amount, Decimal::from(3));
        assert_eq!(level.order_count, 2);
    }

    #[test]
    fn level_total_saturates_instead_of_overflowing() {
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let orders = vec![
            Order::with_id("a", Decimal::from(100), huge, Side::Sell).unwrap(),
            Order::with_id("b", Decimal::from(100), huge, Side::Sell).unwrap(),
        ];
        let level = OrderBookLevel::from_queue(Decimal::from(100), &orders).unwrap();
        assert_eq!(level.total_amount, Decimal::MAX);
        assert_eq!(level.order_count, 2);
    }

    #[test]
    fn empty_queue_has_no_level() {
        let orders: Vec<Order> = Vec::new();
        assert!(OrderBookLevel::from_queue(Decimal::ONE, &orders).is_none());
    }

    #[test]
    fn clock_is_past_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }
}
