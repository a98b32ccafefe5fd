//! CSV adapters and input discovery.
//!
//! The adapters open, read to completion, and close before the engine
//! starts; no file handles cross component boundaries.

mod discover;
mod reader;
mod writer;

pub use discover::{discover_inputs, discover_inputs_from, SessionPaths, ORDER_FILE, OUTPUT_FILE, TRADE_FILE};
pub use reader::{load_orders, load_trades};
pub use writer::{snapshot_header, write_snapshots};
