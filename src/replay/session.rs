//! Replay session: the owned state machine driving one session's replay.
//!
//! A session owns the book, the running statistics, the snapshot buffer,
//! and the diagnostics accumulator. Feeding it the two input streams
//! replays them deterministically: identical inputs produce identical
//! snapshots, byte for byte once written.

use crate::book::{InsertOutcome, OrderBook};
use crate::diagnostics::{DiagnosticCategory, Diagnostics};
use crate::snapshot::BookSnapshot;
use crate::stats::SessionStats;
use crate::types::{ExecType, OrderMessage, TradeMessage};

use super::classifier::ImmediateExecutionIndex;
use super::sequencer::{merge_events, EventKind};

/// Configuration for a replay session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session opening transact time (HHMMSSmmm). Orders before this
    /// construct the call-auction book without emitting snapshots.
    pub opening_time: i64,

    /// Classifier window: max |order time − trade time| in transact-time
    /// units for a fill to mark its order as immediate-executing.
    pub immediate_window: i64,

    /// Number of levels per side in each snapshot sequence.
    pub depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            opening_time: 93000000, // 09:30:00.000
            immediate_window: 1000, // 1 ms
            depth: 5,
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opening transact time.
    pub fn with_opening_time(mut self, opening_time: i64) -> Self {
        self.opening_time = opening_time;
        self
    }

    /// Set the immediate-execution window.
    pub fn with_immediate_window(mut self, window: i64) -> Self {
        self.immediate_window = window;
        self
    }

    /// Set the snapshot depth per side.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Single-session replay engine.
///
/// Drive it with [`ReplaySession::run`], then read the snapshot buffer,
/// statistics, and diagnostics. The engine never rejects an event;
/// anomalies are tallied and replay continues.
#[derive(Debug, Default)]
pub struct ReplaySession {
    config: SessionConfig,
    book: OrderBook,
    stats: SessionStats,
    snapshots: Vec<BookSnapshot>,
    diagnostics: Diagnostics,
    market_opened: bool,
}

impl ReplaySession {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            book: OrderBook::new(),
            stats: SessionStats::new(),
            snapshots: Vec::new(),
            diagnostics: Diagnostics::new(),
            market_opened: false,
        }
    }

    /// Replay both streams to completion.
    ///
    /// Runs the immediate-execution pre-pass, merges the streams in event
    /// time, and applies each event in sequence. May be called once per
    /// session object.
    pub fn run(&mut self, orders: &[OrderMessage], trades: &[TradeMessage]) {
        let immediate =
            ImmediateExecutionIndex::build(orders, trades, self.config.immediate_window);

        log::debug!(
            "replaying {} orders and {} trades ({} flagged immediate)",
            orders.len(),
            trades.len(),
            immediate.len()
        );

        for event in merge_events(orders, trades) {
            match event.kind {
                EventKind::Order => self.process_order(&orders[event.index], &immediate),
                EventKind::Trade => self.process_trade(&trades[event.index]),
            }
        }
    }

    fn process_order(&mut self, order: &OrderMessage, immediate: &ImmediateExecutionIndex) {
        // Only market/best orders can execute on arrival; a flagged limit
        // order still rests (its fill consumes it moments later).
        let immediate_exec = order.order_type.needs_price_resolution()
            && immediate.is_immediate(order.appl_seq_num);

        let pre_open = order.transact_time < self.config.opening_time;

        if pre_open || !immediate_exec {
            match self.book.insert_order(order) {
                InsertOutcome::Rested => {}
                InsertOutcome::ZeroQuantity => {
                    self.diagnostics.record(
                        DiagnosticCategory::ZeroQuantityOrder,
                        format!("order {} has zero quantity", order.appl_seq_num),
                    );
                }
                InsertOutcome::NoReferencePrice => {
                    log::debug!(
                        "order {} ({:?} {:?}) dropped: no reference price",
                        order.appl_seq_num,
                        order.side,
                        order.order_type
                    );
                    self.diagnostics.record(
                        DiagnosticCategory::NoReferencePrice,
                        format!("order {} found no reference price", order.appl_seq_num),
                    );
                }
            }
        }

        if !pre_open && !immediate_exec {
            if !self.market_opened {
                self.market_opened = true;
                log::info!(
                    "market opened at transact time {}, emitting first snapshot",
                    order.transact_time
                );
            }
            self.emit(order.clock_at_arrival, order.transact_time);
        }
    }

    fn process_trade(&mut self, trade: &TradeMessage) {
        match trade.exec_type {
            ExecType::Filled => {
                self.stats
                    .record_fill(trade.price, trade.qty, trade.bid_ref, trade.ask_ref);

                let missing = self.book.apply_fill(trade.bid_ref, trade.ask_ref, trade.qty);
                for _ in 0..missing {
                    self.diagnostics.record(
                        DiagnosticCategory::MissingRestingOrder,
                        format!(
                            "fill {} referenced a non-resting order (bid {}, ask {})",
                            trade.appl_seq_num, trade.bid_ref, trade.ask_ref
                        ),
                    );
                }
            }
            ExecType::Cancelled => {
                let missing = self.book.apply_cancel(trade.bid_ref, trade.ask_ref);
                for _ in 0..missing {
                    self.diagnostics.record(
                        DiagnosticCategory::MissingRestingOrder,
                        format!(
                            "cancel {} referenced a non-resting order (bid {}, ask {})",
                            trade.appl_seq_num, trade.bid_ref, trade.ask_ref
                        ),
                    );
                }
            }
        }

        self.emit(trade.clock_at_arrival, trade.transact_time);
    }

    fn emit(&mut self, clock_at_arrival: i64, transact_time: i64) {
        let depth = self.config.depth;
        self.snapshots.push(BookSnapshot {
            clock_at_arrival,
            transact_time,
            best_bids: self.book.best_bids(depth),
            best_asks: self.book.best_asks(depth),
            worst_bids: self.book.worst_bids(depth),
            worst_asks: self.book.worst_asks(depth),
            stats: self.stats,
        });
    }

    /// Emitted snapshots, in replay order.
    pub fn snapshots(&self) -> &[BookSnapshot] {
        &self.snapshots
    }

    /// Consume the session, yielding the snapshot buffer.
    pub fn into_snapshots(self) -> Vec<BookSnapshot> {
        self.snapshots
    }

    /// Final session statistics.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Final book state.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Accumulated anomalies.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Whether the post-open phase was reached.
    pub fn market_opened(&self) -> bool {
        self.market_opened
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
