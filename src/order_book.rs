//! Two-sided resting-order storage with price-time ordering.
//!
//! Each side is a map from price to a FIFO queue of orders. Best bid is the
//! highest price, best ask the lowest; within a price the earliest insert comes
//! first. Empty queues are dropped immediately, so every key is a live level.
//!
//! Nothing here is synchronized; [`crate::Book`] wraps it in a lock.

use crate::error::{BookError, Result};
use crate::snapshot::OrderBookLevel;
use crate::types::{Order, OrderId, Side};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Orders at one price, oldest first.
type Queue = VecDeque<Order>;
/// Price -> queue. Bids are read back to front.
type Levels = BTreeMap<Decimal, Queue>;

/// Unsynchronized limit order book for one instrument.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: Levels,
    asks: Levels,
    /// Every resting order by id: (side, price level key).
    index: HashMap<OrderId, (Side, Decimal)>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    fn side_levels(&self, side: Side) -> &Levels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_levels_mut(&mut self, side: Side) -> &mut Levels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Appends to the back of the order's price level. Caller guarantees the id is new.
    fn push_back(&mut self, order: Order) {
        self.index.insert(order.id.clone(), (order.side, order.price));
        self.side_levels_mut(order.side)
            .entry(order.price)
            .or_default()
            .push_back(order);
    }

    /// Inserts a resting order behind every order at the same or better price.
    ///
    /// Does not validate price/amount and does not match; see [`crate::matching`].
    pub fn insert(&mut self, order: Order) -> Result<()> {
        if self.index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrderId(order.id));
        }
        self.push_back(order);
        Ok(())
    }

    /// Removes the order with `id` from `side`. Other orders keep their relative order.
    pub fn remove_by_id(&mut self, side: Side, id: &OrderId) -> Option<Order> {
        let &(indexed_side, price) = self.index.get(id)?;
        if indexed_side != side {
            return None;
        }
        let levels = self.side_levels_mut(side);
        let queue = levels.get_mut(&price)?;
        let pos = queue.iter().position(|o| &o.id == id)?;
        let removed = queue.remove(pos);
        if queue.is_empty() {
            levels.remove(&price);
        }
        self.index.remove(id);
        removed
    }

    /// Removes the order with `id` from whichever side holds it.
    pub fn cancel(&mut self, id: &OrderId) -> Option<Order> {
        let side = self.locate(id)?;
        self.remove_by_id(side, id)
    }

    /// Changes price and amount of a resting order. Returns false if `id` is not on `side`.
    ///
    /// Same price: amount is updated where the order stands. New price: the order
    /// moves to the back of the new level and loses its time priority.
    pub fn reposition(&mut self, side: Side, id: &OrderId, new_price: Decimal, new_amount: Decimal) -> bool {
        let Some(&(indexed_side, price)) = self.index.get(id) else {
            return false;
        };
        if indexed_side != side {
            return false;
        }
        if new_price == price {
            let resting = self
                .side_levels_mut(side)
                .get_mut(&price)
                .and_then(|queue| queue.iter_mut().find(|o| &o.id == id));
            return match resting {
                Some(order) => {
                    order.amount = new_amount;
                    true
                }
                None => false,
            };
        }
        let Some(mut order) = self.remove_by_id(side, id) else {
            return false;
        };
        order.price = new_price;
        order.amount = new_amount;
        self.push_back(order);
        true
    }

    /// Side holding `id`, if it is resting.
    pub fn locate(&self, id: &OrderId) -> Option<Side> {
        self.index.get(id).map(|&(side, _)| side)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        let &(side, price) = self.index.get(id)?;
        self.side_levels(side).get(&price)?.iter().find(|o| &o.id == id)
    }

    /// Best-priced, earliest order on `side`.
    pub fn best(&self, side: Side) -> Option<&Order> {
        match side {
            Side::Buy => self.bids.values().next_back()?.front(),
            Side::Sell => self.asks.values().next()?.front(),
        }
    }

    /// Mutable head of `side` for matching. Reducing its amount never breaks price order.
    pub(crate) fn head_mut(&mut self, side: Side) -> Option<&mut Order> {
        match side {
            Side::Buy => self.bids.values_mut().next_back()?.front_mut(),
            Side::Sell => self.asks.values_mut().next()?.front_mut(),
        }
    }

    /// Removes the head of `side` (a fully consumed order).
    pub(crate) fn pop_head(&mut self, side: Side) -> Option<Order> {
        let mut level = match side {
            Side::Buy => self.bids.last_entry()?,
            Side::Sell => self.asks.first_entry()?,
        };
        let head = level.get_mut().pop_front();
        if level.get().is_empty() {
            level.remove();
        }
        if let Some(order) = &head {
            self.index.remove(&order.id);
        }
        head
    }

    /// Orders on `side` in priority order: best price first, then time.
    pub fn iter_side(&self, side: Side) -> Box<dyn Iterator<Item = &Order> + '_> {
        match side {
            Side::Buy => Box::new(self.bids.values().rev().flatten()),
            Side::Sell => Box::new(self.asks.values().flatten()),
        }
    }

    /// Owned copy of [`Self::iter_side`].
    pub fn side_orders(&self, side: Side) -> Vec<Order> {
        self.iter_side(side).cloned().collect()
    }

    /// One aggregated level per distinct price, best price first.
    pub fn depth(&self, side: Side) -> Vec<OrderBookLevel> {
        let levels = self.side_levels(side);
        let aggregate = |(price, queue): (&Decimal, &Queue)| OrderBookLevel::from_queue(*price, queue);
        match side {
            Side::Buy => levels.iter().rev().filter_map(aggregate).collect(),
            Side::Sell => levels.iter().filter_map(aggregate).collect(),
        }
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn side_len(&self, side: Side) -> usize {
        self.side_levels(side).values().map(VecDeque::len).sum()
    }
}
