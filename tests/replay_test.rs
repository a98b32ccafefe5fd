//! End-to-end replay scenarios.
//!
//! Each test builds a small session in memory, replays it, and checks the
//! emitted snapshots and statistics. The final test drives the full
//! pipeline: CSV inputs on disk through discovery, load, replay, and the
//! snapshot writer.

use std::fs;
use std::path::PathBuf;

use lob_replay::io::{discover_inputs_from, load_orders, load_trades, write_snapshots};
use lob_replay::{
    Diagnostics, ExecType, OrderMessage, OrderType, ReplaySession, Side, TradeMessage,
};

fn order(
    seq: u64,
    side: Side,
    order_type: OrderType,
    price: i64,
    qty: u64,
    tt: i64,
) -> OrderMessage {
    OrderMessage {
        clock_at_arrival: tt,
        sequence_no: seq as i64,
        transact_time: tt,
        appl_seq_num: seq,
        side,
        order_type,
        price,
        qty,
    }
}

fn fill(seq: u64, price: i64, qty: u64, bid_ref: u64, ask_ref: u64, tt: i64) -> TradeMessage {
    TradeMessage {
        clock_at_arrival: tt,
        sequence_no: seq as i64,
        transact_time: tt,
        appl_seq_num: seq,
        exec_type: ExecType::Filled,
        price,
        qty,
        money: (price as f64 / 100.0) * qty as f64,
        bid_ref,
        ask_ref,
    }
}

fn cancel(seq: u64, bid_ref: u64, ask_ref: u64, tt: i64) -> TradeMessage {
    TradeMessage {
        clock_at_arrival: tt,
        sequence_no: seq as i64,
        transact_time: tt,
        appl_seq_num: seq,
        exec_type: ExecType::Cancelled,
        price: 0,
        qty: 0,
        money: 0.0,
        bid_ref,
        ask_ref,
    }
}

// ============================================================================
// Scenario: pre-open auction build-up, then a single opening cross
// ============================================================================

#[test]
fn test_pre_open_then_single_cross() {
    let orders = vec![
        order(1, Side::Buy, OrderType::Limit, 1000, 100, 92500000),
        order(2, Side::Sell, OrderType::Limit, 1000, 100, 92500001),
    ];
    let trades = vec![fill(10, 1000, 100, 1, 2, 93000000)];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    // Pre-open orders emit nothing; the opening cross emits the first record.
    assert_eq!(session.snapshots().len(), 1);

    let snap = &session.snapshots()[0];
    assert!(snap.best_bids.is_empty());
    assert!(snap.best_asks.is_empty());
    assert_eq!(snap.stats.cumulative_volume, 100);
    assert_eq!(snap.stats.last_price, 1000);
    assert_eq!(snap.stats.number_of_trades, 1);
    assert_eq!(snap.stats.cumulative_trade_orders, 2);
    assert_eq!(snap.stats.opening_price, Some(1000));
}

// ============================================================================
// Scenario: market order resolves against the best ask, never rests
// ============================================================================

#[test]
fn test_market_order_resolves_against_best_ask() {
    let orders = vec![
        order(7, Side::Sell, OrderType::Limit, 1100, 50, 93000001),
        order(8, Side::Buy, OrderType::Market, 0, 30, 93100000),
    ];
    let trades = vec![fill(20, 1100, 30, 8, 7, 93100000)];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    // Order 8 executed on arrival: it never rests and emits no snapshot.
    assert!(session.book().bid(8).is_none());

    let last = session.snapshots().last().unwrap();
    assert_eq!(last.best_asks, vec![(1100, 20)]);
    assert!(last.best_bids.is_empty());
    assert_eq!(last.stats.cumulative_volume, 30);
    assert_eq!(last.stats.last_price, 1100);
}

// ============================================================================
// Scenario: cancel removes a resting order without touching stats
// ============================================================================

#[test]
fn test_cancel_of_resting_order() {
    let orders = vec![order(5, Side::Buy, OrderType::Limit, 998, 200, 93000001)];
    let trades = vec![cancel(30, 5, 0, 93100000)];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    assert!(session.book().bid(5).is_none());
    let last = session.snapshots().last().unwrap();
    assert!(last.best_bids.is_empty());
    assert_eq!(last.stats.cumulative_volume, 0);
    assert_eq!(last.stats.number_of_trades, 0);
    assert_eq!(last.stats.opening_price, None);
}

// ============================================================================
// Scenario: orders at the same price aggregate into one level
// ============================================================================

#[test]
fn test_aggregation_at_same_price() {
    let orders = vec![
        order(1, Side::Buy, OrderType::Limit, 1005, 10, 93000001),
        order(2, Side::Buy, OrderType::Limit, 1005, 20, 93000002),
        order(3, Side::Buy, OrderType::Limit, 1005, 30, 93000003),
    ];

    let mut session = ReplaySession::new();
    session.run(&orders, &[]);

    let last = session.snapshots().last().unwrap();
    assert_eq!(last.best_bids, vec![(1005, 60)]);
}

// ============================================================================
// Scenario: worst levels reflect the bottom of the book
// ============================================================================

#[test]
fn test_worst_levels_reflect_bottom_of_book() {
    let orders = vec![
        order(1, Side::Sell, OrderType::Limit, 1100, 10, 93000001),
        order(2, Side::Sell, OrderType::Limit, 1105, 10, 93000002),
        order(3, Side::Sell, OrderType::Limit, 1110, 10, 93000003),
    ];

    let mut session = ReplaySession::new();
    session.run(&orders, &[]);

    let last = session.snapshots().last().unwrap();
    assert_eq!(
        last.worst_asks,
        vec![(1110, 10), (1105, 10), (1100, 10)]
    );
}

// ============================================================================
// Scenario: order-before-trade tie-break at a shared timestamp
// ============================================================================

#[test]
fn test_order_before_trade_tie_break() {
    // Empty book; a new order and the trade consuming it share one
    // timestamp. Only order-first sequencing leaves a clean book.
    let orders = vec![order(1, Side::Buy, OrderType::Limit, 1000, 50, 93100000)];
    let trades = vec![fill(40, 1000, 50, 1, 0, 93100000)];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    assert!(session.book().is_empty());
    assert_eq!(session.stats().cumulative_volume, 50);

    // The trade found the order resting: no missing-reference anomaly.
    assert_eq!(session.diagnostics().total(), 0);
}

// ============================================================================
// Universal invariants over a busier session
// ============================================================================

#[test]
fn test_snapshot_invariants_over_session() {
    let mut orders = Vec::new();
    for i in 0..20u64 {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        let price = if i % 2 == 0 {
            1000 - (i as i64 % 5)
        } else {
            1001 + (i as i64 % 5)
        };
        orders.push(order(
            i + 1,
            side,
            OrderType::Limit,
            price,
            10 + i,
            93000001 + i as i64,
        ));
    }
    let trades = vec![
        fill(100, 1000, 5, 1, 2, 93000100),
        fill(101, 1001, 8, 3, 4, 93000200),
        cancel(102, 5, 0, 93000300),
    ];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    let mut prev_trades = 0;
    let mut prev_volume = 0;
    for snap in session.snapshots() {
        // Best bids strictly descending, best asks strictly ascending.
        for pair in snap.best_bids.windows(2) {
            assert!(pair[0].0 > pair[1].0);
        }
        for pair in snap.best_asks.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }

        // All emitted quantities are positive.
        for &(_, qty) in snap
            .best_bids
            .iter()
            .chain(&snap.best_asks)
            .chain(&snap.worst_bids)
            .chain(&snap.worst_asks)
        {
            assert!(qty > 0);
        }

        // Counters never decrease.
        assert!(snap.stats.number_of_trades >= prev_trades);
        assert!(snap.stats.cumulative_volume >= prev_volume);
        prev_trades = snap.stats.number_of_trades;
        prev_volume = snap.stats.cumulative_volume;
    }

    // Opening price equals the first fill's price and never moved.
    assert_eq!(session.stats().opening_price, Some(1000));
}

#[test]
fn test_partial_fill_leaves_remainder_at_price() {
    let orders = vec![order(1, Side::Buy, OrderType::Limit, 1000, 100, 93000001)];
    let trades = vec![fill(50, 1000, 40, 1, 0, 93000100)];

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    let last = session.snapshots().last().unwrap();
    assert_eq!(last.best_bids, vec![(1000, 60)]);
}

// ============================================================================
// Determinism: full pipeline over CSV files, byte-identical across runs
// ============================================================================

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lob_replay_e2e_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const ORDERS_CSV: &str = "\
clockatarrival,sequenceno,transacttime,applseqnum,side,ordertype,price,orderqty
100,1,92500000,1,1,2,10.00,100
200,2,92500001,2,2,2,10.00,100
300,3,93000002,3,1,2,9.98,50
";

const TRADES_CSV: &str = "\
clockatarrival,sequenceno,transacttime,applseqnum,exectype,tradeprice,tradeqty,trademoney,bidapplseqnum,offerapplseqnum
250,1,93000000,10,f,10.00,100,1000.00,1,2
";

fn run_pipeline(dir: &PathBuf) -> Vec<u8> {
    let paths = discover_inputs_from(dir).expect("inputs not discovered");

    let mut diagnostics = Diagnostics::new();
    let orders = load_orders(&paths.orders, &mut diagnostics).unwrap();
    let trades = load_trades(&paths.trades, &mut diagnostics).unwrap();
    assert!(diagnostics.is_empty());

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    write_snapshots(&paths.output, session.snapshots()).unwrap();
    fs::read(&paths.output).unwrap()
}

#[test]
fn test_csv_pipeline_end_to_end() {
    let dir = scratch_dir("pipeline");
    fs::write(dir.join("order_new.csv"), ORDERS_CSV).unwrap();
    fs::write(dir.join("trade_new.csv"), TRADES_CSV).unwrap();

    let bytes = run_pipeline(&dir);
    let contents = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    // Header + opening cross + one post-open order.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("clockatarrival,transacttime,best_bid_1_price"));

    // The opening cross: empty book, stats populated.
    let cross: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(cross.len(), 47);
    assert_eq!(cross[0], "250");
    assert_eq!(cross[1], "93000000");
    assert!(cross[2..42].iter().all(|f| f.is_empty()));
    assert_eq!(&cross[42..], &["100", "10.00", "2", "1", "10.00"]);

    // The post-open bid now rests alone.
    let resting: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(resting[2], "9.98");
    assert_eq!(resting[3], "50");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_replay_is_byte_identical_across_runs() {
    let dir_a = scratch_dir("det_a");
    let dir_b = scratch_dir("det_b");

    for dir in [&dir_a, &dir_b] {
        fs::write(dir.join("order_new.csv"), ORDERS_CSV).unwrap();
        fs::write(dir.join("trade_new.csv"), TRADES_CSV).unwrap();
    }

    assert_eq!(run_pipeline(&dir_a), run_pipeline(&dir_b));

    let _ = fs::remove_dir_all(&dir_a);
    let _ = fs::remove_dir_all(&dir_b);
}
