//! Types returned to SDK callers

pub mod envelope;
pub mod order;

pub use envelope::{OrderPaidResult, OrderStatusResult};
pub use order::OrderStatus;
