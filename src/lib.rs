//! # lob-replay
//!
//! Deterministic limit order book reconstruction from exchange order and
//! trade CSV streams.
//!
//! The engine replays two time-ordered streams in event time: orders and
//! trades merge into one sequence (orders first within a shared
//! timestamp), a pre-pass flags orders that executed on arrival so they
//! never pollute the resting book, and every qualifying event emits a
//! snapshot of the top and bottom five aggregated price levels per side
//! together with running session statistics. It is a *replayer*, not a
//! matcher: exchange-reported trades are ground truth for fills.
//!
//! Identical inputs produce byte-identical output; the engine is a pure
//! single-threaded state machine.
//!
//! ## Quick start
//!
//! ```rust
//! use lob_replay::{OrderMessage, OrderType, ReplaySession, Side};
//!
//! let orders = vec![OrderMessage {
//!     clock_at_arrival: 1,
//!     sequence_no: 1,
//!     transact_time: 93000001,
//!     appl_seq_num: 1,
//!     side: Side::Buy,
//!     order_type: OrderType::Limit,
//!     price: 1000, // 10.00 in cents
//!     qty: 100,
//! }];
//!
//! let mut session = ReplaySession::new();
//! session.run(&orders, &[]);
//!
//! assert_eq!(session.snapshots().len(), 1);
//! assert_eq!(session.snapshots()[0].best_bids, vec![(1000, 100)]);
//! ```
//!
//! ## Module overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Messages, sides, order/exec types, fixed-point prices |
//! | [`book`] | Resting book state and price-level aggregation |
//! | [`replay`] | Sequencer, immediate-execution classifier, session |
//! | [`stats`] | Running session statistics |
//! | [`snapshot`] | Materialized per-event book views |
//! | [`io`] | CSV adapters: discovery, readers, snapshot writer |
//! | [`diff`] | Snapshot CSV comparison utilities |
//! | [`diagnostics`] | Categorized anomaly accumulation |

pub mod book;
pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod io;
pub mod replay;
pub mod snapshot;
pub mod stats;
pub mod types;

// Re-exports - Core types
pub use error::{ReplayError, Result};
pub use types::{
    cents_to_f64, format_cents, price_to_cents, ExecType, OrderMessage, OrderType, RestingOrder,
    Side, TradeMessage,
};

// Re-exports - Book and replay engine
pub use book::{InsertOutcome, OrderBook};
pub use replay::{merge_events, Event, EventKind, ImmediateExecutionIndex, ReplaySession, SessionConfig};

// Re-exports - Outputs
pub use snapshot::BookSnapshot;
pub use stats::SessionStats;

// Re-exports - Diagnostics
pub use diagnostics::{DiagnosticCategory, Diagnostics, DiagnosticsSummary};
