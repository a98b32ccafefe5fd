//! Core data types for order/trade messages and resting book entries.
//!
//! Prices are fixed-point `i64` hundredths of a currency unit (cents)
//! throughout. The input feeds carry two-decimal prices, so cents represent
//! them exactly and price-level equality is plain integer equality.
//! Transact times use the exchange's integer `HHMMSSmmm` encoding.

use serde::{Deserialize, Serialize};

/// Order side as encoded in the feed (1 = buy, 2 = sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// Buy order (rests on the bid side)
    Buy = 1,
    /// Sell order (rests on the ask side)
    Sell = 2,
}

impl Side {
    /// Parse a side from the feed's integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Side::Buy),
            2 => Some(Side::Sell),
            _ => None,
        }
    }

    /// The opposite side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type as encoded in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderType {
    /// Trades at the best available opposite-side price
    Market = b'1',
    /// Trades at the stated price
    Limit = b'2',
    /// Pegs to the current best price on its own side
    Best = b'u',
}

impl OrderType {
    /// Parse an order type from its feed byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(OrderType::Market),
            b'2' => Some(OrderType::Limit),
            b'u' => Some(OrderType::Best),
            _ => None,
        }
    }

    /// Convert to the feed byte representation.
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// True for order types whose working price is resolved against the
    /// book at insertion time (market and best).
    #[inline]
    pub fn needs_price_resolution(self) -> bool {
        !matches!(self, OrderType::Limit)
    }
}

/// Trade execution type as encoded in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExecType {
    /// Fill: volume traded between the referenced orders
    Filled = b'f',
    /// Cancel: the referenced order leaves the book, no volume
    Cancelled = b'4',
}

impl ExecType {
    /// Parse an exec type from its feed byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'f' => Some(ExecType::Filled),
            b'4' => Some(ExecType::Cancelled),
            _ => None,
        }
    }

    /// Convert to the feed byte representation.
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// A single order message from the order stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMessage {
    /// Monotonic arrival stamp assigned by the capture host (nanoseconds)
    pub clock_at_arrival: i64,

    /// Feed sequence number
    pub sequence_no: i64,

    /// Exchange session time, integer HHMMSSmmm
    pub transact_time: i64,

    /// Application sequence number: the order's durable identity,
    /// unique per side within the session
    pub appl_seq_num: u64,

    /// Buy or sell
    pub side: Side,

    /// Limit, market, or best
    pub order_type: OrderType,

    /// Stated price in cents (ignored for market/best until resolution)
    pub price: i64,

    /// Order quantity
    pub qty: u64,
}

impl OrderMessage {
    /// Stated price as floating-point currency units.
    #[inline]
    pub fn price_f64(&self) -> f64 {
        cents_to_f64(self.price)
    }
}

/// A single trade message from the trade stream.
///
/// `bid_ref` / `ask_ref` name the resting orders on each side by
/// application sequence number; 0 means no counterparty on that side
/// (cancels reference only one side).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMessage {
    /// Monotonic arrival stamp assigned by the capture host (nanoseconds)
    pub clock_at_arrival: i64,

    /// Feed sequence number
    pub sequence_no: i64,

    /// Exchange session time, integer HHMMSSmmm
    pub transact_time: i64,

    /// Application sequence number of the trade itself
    pub appl_seq_num: u64,

    /// Filled or cancelled
    pub exec_type: ExecType,

    /// Trade price in cents
    pub price: i64,

    /// Traded quantity
    pub qty: u64,

    /// Traded money as reported by the feed
    pub money: f64,

    /// Resting bid order reference (0 = none)
    pub bid_ref: u64,

    /// Resting ask order reference (0 = none)
    pub ask_ref: u64,
}

impl TradeMessage {
    /// Trade price as floating-point currency units.
    #[inline]
    pub fn price_f64(&self) -> f64 {
        cents_to_f64(self.price)
    }
}

/// An order resident in the book.
///
/// Created at insertion (market/best prices already resolved), mutated by
/// trade application, removed when quantity reaches zero or on cancel.
/// Invariant: `qty > 0` while resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    /// Effective price in cents
    pub price: i64,
    /// Remaining quantity
    pub qty: u64,
    /// Transact time of the originating order
    pub order_time: i64,
}

/// Convert a decimal price to fixed-point cents, rounding to the nearest.
#[inline]
pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Convert fixed-point cents back to floating-point currency units.
#[inline]
pub fn cents_to_f64(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Render cents with fixed two-decimal precision, e.g. `1005` → `"10.05"`.
///
/// Integer arithmetic only, so output bytes are identical across runs and
/// platforms.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
