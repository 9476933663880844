//! Thread-safe book façade.
//!
//! [`Book`] guards one [`OrderBook`] (both sides together) with a single
//! readers-writer lock. Mutations take the write lock for their whole
//! duration, including match-then-rest in [`Book::process`]; queries take the
//! read lock. Validation happens before any lock is taken, so a rejected
//! request never touches book state.

use crate::error::{BookError, Result};
use crate::execution::Trade;
use crate::matching::{match_order, MatchOutcome};
use crate::order_book::OrderBook;
use crate::snapshot::{now_millis, BookSnapshot};
use crate::types::{Order, OrderId, Side};
use log::{debug, info};
use parking_lot::RwLock;
use rust_decimal::Decimal;

/// Consolidated limit order book for one instrument tag.
///
/// Share it across threads with `Arc<Book>`; every method takes `&self`.
#[derive(Debug)]
pub struct Book {
    tag: String,
    id: String,
    inner: RwLock<OrderBook>,
}

impl Book {
    /// Creates an empty book for `tag` with a fresh instance id.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: uuid::Uuid::new_v4().to_string(),
            inner: RwLock::new(OrderBook::new()),
        }
    }

    /// Instrument tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Book instance id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rests `order` without matching it.
    pub fn place(&self, order: Order) -> Result<()> {
        order.validate()?;
        let (id, side, price, amount) = (order.id.clone(), order.side, order.price, order.amount);
        self.inner.write().insert(order)?;
        info!(
            "order placed book={} order_id={} side={} price={} amount={}",
            self.tag, id, side, price, amount
        );
        Ok(())
    }

    /// Matches `order` against the book and rests any remainder, atomically.
    pub fn process(&self, order: Order) -> Result<MatchOutcome> {
        order.validate()?;
        let outcome = {
            let mut book = self.inner.write();
            match_order(&mut book, &order)?
        };
        for trade in &outcome.trades {
            log_trade(&self.tag, trade);
        }
        info!(
            "order processed book={} order_id={} side={} price={} amount={} trades={} filled={} rested={}",
            self.tag,
            order.id,
            order.side,
            order.price,
            order.amount,
            outcome.trades.len(),
            outcome.filled_amount(),
            outcome.rested_amount()
        );
        Ok(outcome)
    }

    /// Removes a resting order from whichever side holds it.
    pub fn cancel(&self, id: &OrderId) -> Result<Order> {
        let removed = self.inner.write().cancel(id);
        match removed {
            Some(order) => {
                info!("order canceled book={} order_id={} side={}", self.tag, id, order.side);
                Ok(order)
            }
            None => Err(BookError::OrderNotFound(id.clone())),
        }
    }

    /// Changes price and amount of a resting order.
    ///
    /// A price change sends the order to the back of its new level; an
    /// amount-only change keeps its place.
    pub fn modify(&self, id: &OrderId, new_price: Decimal, new_amount: Decimal) -> Result<()> {
        if new_price <= Decimal::ZERO || new_amount <= Decimal::ZERO {
            return Err(BookError::InvalidModification);
        }
        let mut book = self.inner.write();
        let side = book
            .locate(id)
            .ok_or_else(|| BookError::OrderNotFound(id.clone()))?;
        if !book.reposition(side, id, new_price, new_amount) {
            return Err(BookError::OrderNotFound(id.clone()));
        }
        drop(book);
        info!(
            "order modified book={} order_id={} side={} price={} amount={}",
            self.tag, id, side, new_price, new_amount
        );
        Ok(())
    }

    /// Highest-priced, earliest bid.
    pub fn best_bid(&self) -> Result<Order> {
        self.best(Side::Buy)
    }

    /// Lowest-priced, earliest ask.
    pub fn best_ask(&self) -> Result<Order> {
        self.best(Side::Sell)
    }

    pub fn best(&self, side: Side) -> Result<Order> {
        self.inner
            .read()
            .best(side)
            .cloned()
            .ok_or(BookError::NoOrders(side))
    }

    /// Per-price aggregation of both sides, taken under one read lock.
    pub fn snapshot(&self) -> BookSnapshot {
        let book = self.inner.read();
        BookSnapshot {
            asks: book.depth(Side::Sell),
            bids: book.depth(Side::Buy),
            timestamp_ms: now_millis(),
        }
    }

    /// Resting orders on `side` in priority order.
    pub fn orders(&self, side: Side) -> Vec<Order> {
        self.inner.read().side_orders(side)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Every resting order: bids best-first, then asks best-first.
    ///
    /// Feeding the result to [`Book::load_resting_orders`] rebuilds the same book.
    pub fn resting_orders(&self) -> Vec<Order> {
        let book = self.inner.read();
        book.iter_side(Side::Buy)
            .chain(book.iter_side(Side::Sell))
            .cloned()
            .collect()
    }

    /// Replaces the book's contents with `orders`, inserted in the given order.
    ///
    /// The replacement is staged off-lock; on the first invalid or duplicate
    /// order the current contents are kept untouched.
    pub fn load_resting_orders(&self, orders: &[Order]) -> Result<()> {
        let mut staged = OrderBook::new();
        for order in orders {
            order.validate()?;
            staged.insert(order.clone())?;
        }
        let mut book = self.inner.write();
        *book = staged;
        info!("book restored book={} orders={}", self.tag, book.len());
        Ok(())
    }
}

fn log_trade(tag: &str, trade: &Trade) {
    debug!(
        "trade book={} buy_order={} sell_order={} price={} amount={}",
        tag, trade.buy_order_id, trade.sell_order_id, trade.price, trade.amount
    );
}
