//! Input file discovery.
//!
//! The replayer takes no flags: it looks for the order file in the
//! working directory and up to four parent levels, then derives the trade
//! and output paths beside it.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Order stream file name.
pub const ORDER_FILE: &str = "order_new.csv";

/// Trade stream file name.
pub const TRADE_FILE: &str = "trade_new.csv";

/// Output snapshot file name.
pub const OUTPUT_FILE: &str = "book_new.csv";

/// How many parent directories to probe above the starting one.
const MAX_PARENT_LEVELS: usize = 4;

/// Resolved session file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Order stream input
    pub orders: PathBuf,
    /// Trade stream input
    pub trades: PathBuf,
    /// Snapshot output, written beside the inputs
    pub output: PathBuf,
}

/// Discover inputs starting from the current working directory.
pub fn discover_inputs() -> Result<Option<SessionPaths>> {
    let cwd = std::env::current_dir()?;
    Ok(discover_inputs_from(&cwd))
}

/// Discover inputs starting from `base`, probing it and up to four
/// parents. Returns `None` when no candidate directory holds the order
/// file.
pub fn discover_inputs_from(base: &Path) -> Option<SessionPaths> {
    let mut dir = base;

    for _ in 0..=MAX_PARENT_LEVELS {
        let orders = dir.join(ORDER_FILE);
        if orders.is_file() {
            return Some(SessionPaths {
                trades: orders.with_file_name(TRADE_FILE),
                output: orders.with_file_name(OUTPUT_FILE),
                orders,
            });
        }
        dir = dir.parent()?;
    }

    None
}
