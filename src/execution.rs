//! Trades emitted by matching.
//!
//! The book never stores a [`Trade`]; keeping a trade log is up to the caller.

use rust_decimal::Decimal;

use crate::types::{Order, OrderId, Side};

/// One execution between a buy and a sell order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Decimal,
    pub amount: Decimal,
}

impl Trade {
    /// Trade of `amount` between an incoming order and a resting one, at the resting price.
    pub(crate) fn between(incoming: &Order, resting: &Order, amount: Decimal) -> Self {
        let (buy_order_id, sell_order_id) = match incoming.side {
            Side::Buy => (incoming.id.clone(), resting.id.clone()),
            Side::Sell => (resting.id.clone(), incoming.id.clone()),
        };
        Self {
            buy_order_id,
            sell_order_id,
            price: resting.price,
            amount,
        }
    }
}
