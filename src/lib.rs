//! # Limit Order Book
//!
//! In-memory limit order book for one instrument: resting orders kept in
//! price-time priority, incoming orders matched against the opposite side,
//! and aggregated snapshots of both sides.
//!
//! ## Entry point
//!
//! Use [`Book`] as the single entry point. It is safe to share across threads
//! (`Arc<Book>`): [`Book::place`], [`Book::process`], [`Book::cancel`] and
//! [`Book::modify`] mutate under one exclusive lock; [`Book::best_bid`],
//! [`Book::best_ask`] and [`Book::snapshot`] read under a shared one.
//!
//! ## Example
//!
//! ```rust
//! use limit_order_book::{Book, Order, Side};
//! use rust_decimal::Decimal;
//!
//! let book = Book::new("MAIN");
//! book.place(Order::with_id("s1", Decimal::from(100), Decimal::ONE, Side::Sell).unwrap()).unwrap();
//!
//! let buy = Order::with_id("b1", Decimal::from(100), Decimal::from(2), Side::Buy).unwrap();
//! let outcome = book.process(buy).unwrap();
//! assert_eq!(outcome.trades.len(), 1);
//! assert_eq!(book.best_bid().unwrap().amount, Decimal::ONE);
//! ```
//!
//! ## Lower-level API
//!
//! [`OrderBook`] and [`match_order`] are the unsynchronized storage and
//! matching algorithm behind [`Book`], for single-threaded owners.

pub mod api;
pub mod book;
pub mod config;
pub mod error;
pub mod execution;
pub mod matching;
pub mod order_book;
pub mod order_gen;
pub mod snapshot;
pub mod types;

pub use book::Book;
pub use config::ServerConfig;
pub use error::{BookError, Result};
pub use execution::Trade;
pub use matching::{match_order, MatchOutcome};
pub use order_book::OrderBook;
pub use order_gen::{replay_into_book, Generator, GeneratorConfig};
pub use snapshot::{BookSnapshot, OrderBookLevel};
pub use types::{Order, OrderId, Side};
