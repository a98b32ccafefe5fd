//! Materialized book snapshots.
//!
//! One snapshot is produced per qualifying replay event: the top and
//! bottom aggregated price levels on both sides plus a copy of the
//! session statistics at that moment. Level sequences hold `(price_cents,
//! total_qty)` pairs and may be shorter than the configured depth; the
//! CSV writer pads the missing columns.

use serde::{Deserialize, Serialize};

use crate::stats::SessionStats;

/// A materialized view of the book at one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// Arrival clock of the triggering event, copied verbatim
    pub clock_at_arrival: i64,

    /// Transact time of the triggering event, copied verbatim
    pub transact_time: i64,

    /// Best bid levels, price descending
    pub best_bids: Vec<(i64, u64)>,

    /// Best ask levels, price ascending
    pub best_asks: Vec<(i64, u64)>,

    /// Worst bid levels (lowest resting bid prices), price ascending
    pub worst_bids: Vec<(i64, u64)>,

    /// Worst ask levels (highest resting ask prices), price descending
    pub worst_asks: Vec<(i64, u64)>,

    /// Session statistics at emission time
    pub stats: SessionStats,
}

impl BookSnapshot {
    /// Best bid price in cents, if the bid side is non-empty.
    #[inline]
    pub fn best_bid(&self) -> Option<i64> {
        self.best_bids.first().map(|&(p, _)| p)
    }

    /// Best ask price in cents, if the ask side is non-empty.
    #[inline]
    pub fn best_ask(&self) -> Option<i64> {
        self.best_asks.first().map(|&(p, _)| p)
    }
}
