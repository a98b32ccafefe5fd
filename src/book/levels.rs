//! Price-level aggregation.
//!
//! Projects the id-keyed side maps into sorted price ladders on demand.
//! A `BTreeMap` keyed by cent price sums remaining quantities, so equal
//! prices collapse exactly with no floating-point tolerance, and the four
//! level sequences fall out of forward/reverse iteration.

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::types::RestingOrder;

use super::state::OrderBook;

fn aggregate(side: &AHashMap<u64, RestingOrder>) -> BTreeMap<i64, u64> {
    let mut levels: BTreeMap<i64, u64> = BTreeMap::new();
    for order in side.values() {
        *levels.entry(order.price).or_insert(0) += order.qty;
    }
    levels
}

impl OrderBook {
    /// Top `n` bid levels, price descending.
    pub fn best_bids(&self, n: usize) -> Vec<(i64, u64)> {
        aggregate(self.bids()).into_iter().rev().take(n).collect()
    }

    /// Top `n` ask levels, price ascending.
    pub fn best_asks(&self, n: usize) -> Vec<(i64, u64)> {
        aggregate(self.asks()).into_iter().take(n).collect()
    }

    /// Bottom `n` bid levels (lowest resting bid prices), price ascending.
    pub fn worst_bids(&self, n: usize) -> Vec<(i64, u64)> {
        aggregate(self.bids()).into_iter().take(n).collect()
    }

    /// Bottom `n` ask levels (highest resting ask prices), price descending.
    pub fn worst_asks(&self, n: usize) -> Vec<(i64, u64)> {
        aggregate(self.asks()).into_iter().rev().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::book::OrderBook;
    use crate::types::{OrderMessage, OrderType, Side};

    fn limit(seq: u64, side: Side, price: i64, qty: u64) -> OrderMessage {
        OrderMessage {
            clock_at_arrival: 0,
            sequence_no: 0,
            transact_time: 93000000,
            appl_seq_num: seq,
            side,
            order_type: OrderType::Limit,
            price,
            qty,
        }
    }

    #[test]
    fn test_same_price_orders_aggregate() {
        let mut book = OrderBook::new();
        book.insert_order(&limit(1, Side::Buy, 1005, 10));
        book.insert_order(&limit(2, Side::Buy, 1005, 20));
        book.insert_order(&limit(3, Side::Buy, 1005, 30));

        assert_eq!(book.best_bids(5), vec![(1005, 60)]);
    }

    #[test]
    fn test_best_bids_descend_best_asks_ascend() {
        let mut book = OrderBook::new();
        book.insert_order(&limit(1, Side::Buy, 1000, 10));
        book.insert_order(&limit(2, Side::Buy, 1002, 20));
        book.insert_order(&limit(3, Side::Sell, 1010, 5));
        book.insert_order(&limit(4, Side::Sell, 1008, 15));

        assert_eq!(book.best_bids(5), vec![(1002, 20), (1000, 10)]);
        assert_eq!(book.best_asks(5), vec![(1008, 15), (1010, 5)]);
    }

    #[test]
    fn test_worst_levels_mirror_orderings() {
        let mut book = OrderBook::new();
        book.insert_order(&limit(1, Side::Sell, 1100, 10));
        book.insert_order(&limit(2, Side::Sell, 1105, 10));
        book.insert_order(&limit(3, Side::Sell, 1110, 10));

        assert_eq!(
            book.worst_asks(5),
            vec![(1110, 10), (1105, 10), (1100, 10)]
        );

        book.insert_order(&limit(4, Side::Buy, 990, 7));
        book.insert_order(&limit(5, Side::Buy, 995, 8));
        assert_eq!(book.worst_bids(5), vec![(990, 7), (995, 8)]);
    }

    #[test]
    fn test_take_n_truncates() {
        let mut book = OrderBook::new();
        for i in 0..8 {
            book.insert_order(&limit(i + 1, Side::Buy, 1000 + i as i64, 1));
        }

        let top = book.best_bids(5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].0, 1007);
        assert_eq!(top[4].0, 1003);
    }

    #[test]
    fn test_empty_side_gives_empty_ladder() {
        let book = OrderBook::new();
        assert!(book.best_bids(5).is_empty());
        assert!(book.worst_asks(5).is_empty());
    }
}
