//! Running session statistics.
//!
//! Five scalars accumulated over filled trades: cumulative volume, last
//! price, cumulative trading-order count, number of trades, and the
//! opening price (latched on the first fill and never overwritten).

use serde::{Deserialize, Serialize};

/// Cumulative session statistics, updated once per filled trade.
///
/// All counters are monotonically non-decreasing; `last_price` tracks the
/// most recent fill and `opening_price` latches the first one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Total traded volume (sum of fill quantities)
    pub cumulative_volume: u64,

    /// Most recent fill price in cents (0 before any fill)
    pub last_price: i64,

    /// Number of order participations in fills: +1 per non-zero bid
    /// reference and +1 per non-zero ask reference
    pub cumulative_trade_orders: u64,

    /// Count of filled trade records
    pub number_of_trades: u64,

    /// First fill price of the session, in cents
    pub opening_price: Option<i64>,
}

impl SessionStats {
    /// Create zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one filled trade into the statistics.
    pub fn record_fill(&mut self, price: i64, qty: u64, bid_ref: u64, ask_ref: u64) {
        self.cumulative_volume += qty;
        self.last_price = price;
        self.number_of_trades += 1;

        if self.opening_price.is_none() {
            self.opening_price = Some(price);
        }

        if bid_ref != 0 {
            self.cumulative_trade_orders += 1;
        }
        if ask_ref != 0 {
            self.cumulative_trade_orders += 1;
        }
    }

    /// Opening price in cents, 0 before the first fill.
    #[inline]
    pub fn opening_price_cents(&self) -> i64 {
        self.opening_price.unwrap_or(0)
    }

    /// True if no fills have been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number_of_trades == 0
    }
}
