//! Property-based and deterministic invariant tests.
//!
//! Uses proptest to generate seeded order streams, replays them into a book,
//! and checks: sorted sides with stable time order, no crossed book, unique
//! ids, positive resting amounts, and amount conservation per processed order.

use limit_order_book::{Book, Generator, GeneratorConfig, Order, OrderId, Side};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Bids strictly descend across levels, asks strictly ascend, and within a
/// level orders keep arrival order (`arrival` maps id -> sequence number).
fn assert_sorted(book: &Book, arrival: &HashMap<OrderId, usize>) {
    for side in [Side::Buy, Side::Sell] {
        let orders = book.orders(side);
        for pair in orders.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.price == b.price {
                assert!(
                    arrival[&a.id] < arrival[&b.id],
                    "time priority broken at {} on {}",
                    a.price,
                    side
                );
            } else {
                match side {
                    Side::Buy => assert!(a.price > b.price, "bids not descending"),
                    Side::Sell => assert!(a.price < b.price, "asks not ascending"),
                }
            }
        }
    }
}

fn assert_not_crossed(book: &Book) {
    if let (Ok(bid), Ok(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid.price < ask.price, "crossed book: bid {} >= ask {}", bid.price, ask.price);
    }
}

fn assert_resting_well_formed(book: &Book) {
    let resting = book.resting_orders();
    let ids: HashSet<&OrderId> = resting.iter().map(|o| &o.id).collect();
    assert_eq!(ids.len(), resting.len(), "duplicate id on book");
    for o in &resting {
        assert!(o.price > Decimal::ZERO && o.amount > Decimal::ZERO);
    }
}

fn stream(seed: u64, num_orders: usize, amount_scale: u32) -> Vec<Order> {
    Generator::new(GeneratorConfig {
        seed,
        num_orders,
        // narrow band so that plenty of orders cross
        price_min: 9_950,
        price_max: 10_050,
        amount_scale,
        ..Default::default()
    })
    .all_orders()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Every processed order is fully accounted for, and the book stays
    /// sorted and uncrossed after each step.
    #[test]
    fn prop_process_preserves_invariants(seed in 0u64..100_000u64, num_orders in 10usize..150usize, scale in 0u32..4u32) {
        let book = Book::new("PROP");
        let mut arrival = HashMap::new();
        for (seq, order) in stream(seed, num_orders, scale).into_iter().enumerate() {
            arrival.insert(order.id.clone(), seq);
            let amount = order.amount;
            let outcome = book.process(order).unwrap();
            prop_assert_eq!(outcome.filled_amount() + outcome.rested_amount(), amount);
            for t in &outcome.trades {
                prop_assert!(t.amount > Decimal::ZERO);
            }
            assert_sorted(&book, &arrival);
            assert_not_crossed(&book);
        }
        assert_resting_well_formed(&book);
    }

    /// Placing (no matching), cancelling and modifying keep sides sorted;
    /// repositioned orders count as new arrivals.
    #[test]
    fn prop_place_cancel_modify_keep_order(seed in 0u64..100_000u64, num_orders in 10usize..120usize) {
        let book = Book::new("PROP");
        let mut arrival = HashMap::new();
        let mut seq = 0usize;
        let orders = stream(seed, num_orders, 1);
        for order in &orders {
            arrival.insert(order.id.clone(), seq);
            seq += 1;
            book.place(order.clone()).unwrap();
        }
        for (i, order) in orders.iter().enumerate() {
            match i % 3 {
                0 => {
                    book.cancel(&order.id).unwrap();
                }
                1 => {
                    let new_price = order.price + Decimal::ONE;
                    book.modify(&order.id, new_price, order.amount).unwrap();
                    arrival.insert(order.id.clone(), seq);
                    seq += 1;
                }
                _ => {
                    // amount-only change keeps the arrival slot
                    book.modify(&order.id, order.price, order.amount + Decimal::ONE).unwrap();
                }
            }
            assert_sorted(&book, &arrival);
        }
        prop_assert_eq!(book.len(), orders.len() - (orders.len() + 2) / 3);
        assert_resting_well_formed(&book);
    }
}

/// Same config ⇒ same trades and same final book.
#[test]
fn deterministic_replay_same_seed_same_outcome() {
    let run = || {
        let book = Book::new("DET");
        let trades = limit_order_book::replay_into_book(&book, stream(999, 80, 2)).unwrap();
        (trades, book.resting_orders())
    };
    let (trades1, resting1) = run();
    let (trades2, resting2) = run();
    assert_eq!(trades1, trades2);
    assert_eq!(resting1, resting2);
}

/// Many small fractional fills against one large order drain it to exactly zero.
#[test]
fn fractional_fills_leave_no_residue() {
    let book = Book::new("FRAC");
    let big = Order::with_id("big", Decimal::from(100), "3.3".parse().unwrap(), Side::Sell).unwrap();
    book.place(big).unwrap();
    for i in 0..33 {
        let small = Order::with_id(format!("b{}", i), Decimal::from(100), "0.1".parse().unwrap(), Side::Buy).unwrap();
        let outcome = book.process(small).unwrap();
        assert!(outcome.rested.is_none());
    }
    assert!(book.is_empty());
}
