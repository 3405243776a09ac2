// Pure, venue-agnostic pieces: data model and the greedy matcher
pub mod matcher;
pub mod types;

pub use matcher::{execute, execute_buy, execute_sell};
pub use types::{Execution, Order, OrderBook, Side};
