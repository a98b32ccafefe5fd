//! Order book state and derived price-level views.

mod levels;
mod state;

pub use state::{InsertOutcome, OrderBook};
