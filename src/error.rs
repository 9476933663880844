//! Error taxonomy for book operations.

use thiserror::Error;

use crate::types::{OrderId, Side};

/// Failure of a single book operation. None of these leave the book modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("invalid order: price and amount must be greater than 0")]
    InvalidOrder,

    #[error("invalid modification: new price and amount must be greater than 0")]
    InvalidModification,

    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("no {0} orders available")]
    NoOrders(Side),

    #[error("order id already resting: {0}")]
    DuplicateOrderId(OrderId),
}

pub type Result<T> = std::result::Result<T, BookError>;
