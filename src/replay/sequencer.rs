//! Merged-event sequencing.
//!
//! Orders and trades arrive as two separate time-ordered streams; replay
//! needs one total order. Primary key is transact time. When an order and
//! a trade share a timestamp the order goes first, because the resting
//! state a trade consumes must exist before the trade lands. Ties within
//! a kind keep input order (the sort is stable).

use crate::types::{OrderMessage, TradeMessage};

/// Which stream an event came from.
///
/// The discriminant doubles as the same-timestamp tie-break rank:
/// orders before trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum EventKind {
    Order = 0,
    Trade = 1,
}

/// One merged event: a kind plus an index into the originating slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub transact_time: i64,
    pub index: usize,
}

/// Merge both streams into a single replay sequence.
pub fn merge_events(orders: &[OrderMessage], trades: &[TradeMessage]) -> Vec<Event> {
    let mut events = Vec::with_capacity(orders.len() + trades.len());

    for (index, order) in orders.iter().enumerate() {
        events.push(Event {
            kind: EventKind::Order,
            transact_time: order.transact_time,
            index,
        });
    }
    for (index, trade) in trades.iter().enumerate() {
        events.push(Event {
            kind: EventKind::Trade,
            transact_time: trade.transact_time,
            index,
        });
    }

    // Stable: same-kind ties preserve input order.
    events.sort_by_key(|e| (e.transact_time, e.kind));

    events
}
