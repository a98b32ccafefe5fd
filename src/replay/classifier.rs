//! Immediate-execution classification.
//!
//! Exchange feeds deliver an aggressive order followed almost instantly by
//! its fill trade. Replaying such an order into the resting book would
//! leave a phantom entry that the subsequent trade only partially cleans
//! up, so a pre-pass marks every order whose id appears as a fill's bid or
//! ask reference within a small transact-time window of the order itself.
//! Insertion consults the mark for market/best orders.
//!
//! Built as a hash join: fill references index their trade times, each
//! order probes its own id. O(orders + trades) against the naive
//! all-pairs scan.

use ahash::{AHashMap, AHashSet};

use crate::types::{ExecType, OrderMessage, TradeMessage};

/// Set of order ids that executed on arrival.
#[derive(Debug, Clone, Default)]
pub struct ImmediateExecutionIndex {
    flagged: AHashSet<u64>,
}

impl ImmediateExecutionIndex {
    /// Run the pre-pass over the raw input streams.
    ///
    /// `window` is the maximum |order time − trade time| in transact-time
    /// units (milliseconds) for the trade to count as immediate.
    pub fn build(orders: &[OrderMessage], trades: &[TradeMessage], window: i64) -> Self {
        // fill reference -> transact times of the referencing fills
        let mut ref_times: AHashMap<u64, Vec<i64>> = AHashMap::new();
        for trade in trades {
            if trade.exec_type != ExecType::Filled {
                continue;
            }
            if trade.bid_ref != 0 {
                ref_times.entry(trade.bid_ref).or_default().push(trade.transact_time);
            }
            if trade.ask_ref != 0 {
                ref_times.entry(trade.ask_ref).or_default().push(trade.transact_time);
            }
        }

        let mut flagged = AHashSet::new();
        for order in orders {
            if let Some(times) = ref_times.get(&order.appl_seq_num) {
                if times
                    .iter()
                    .any(|&t| (t - order.transact_time).abs() <= window)
                {
                    flagged.insert(order.appl_seq_num);
                }
            }
        }

        Self { flagged }
    }

    /// True if the order id executed on arrival.
    #[inline]
    pub fn is_immediate(&self, appl_seq_num: u64) -> bool {
        self.flagged.contains(&appl_seq_num)
    }

    /// Number of flagged orders.
    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    /// True when no order was flagged.
    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }
}
