//! Snapshot CSV writer.
//!
//! Fixed-width schema: event identifiers, four level sequences of
//! five (price, qty) pairs each, and the five session statistics. Prices
//! render with two fixed decimals from integer cents, quantities as plain
//! integers, absent levels as two empty fields. Output is byte-identical
//! across runs over identical inputs.

use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::snapshot::BookSnapshot;
use crate::types::format_cents;

/// Levels per side in the output schema.
const DEPTH: usize = 5;

/// The fixed output header, in column order.
pub fn snapshot_header() -> Vec<String> {
    let mut header = vec!["clockatarrival".to_string(), "transacttime".to_string()];

    for group in ["best_bid", "best_ask", "worst_bid", "worst_ask"] {
        for level in 1..=DEPTH {
            header.push(format!("{group}_{level}_price"));
            header.push(format!("{group}_{level}_qty"));
        }
    }

    header.extend(["cvl", "lpr", "cto", "nts", "opx"].map(str::to_string));
    header
}

fn push_levels(row: &mut Vec<String>, levels: &[(i64, u64)]) {
    for slot in 0..DEPTH {
        match levels.get(slot) {
            Some(&(price, qty)) => {
                row.push(format_cents(price));
                row.push(qty.to_string());
            }
            None => {
                row.push(String::new());
                row.push(String::new());
            }
        }
    }
}

/// Write all snapshots to `path`, header first.
///
/// Sink failure is fatal: any write error aborts and propagates.
pub fn write_snapshots(path: &Path, snapshots: &[BookSnapshot]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(snapshot_header())?;

    for snapshot in snapshots {
        let mut row: Vec<String> = Vec::with_capacity(47);
        row.push(snapshot.clock_at_arrival.to_string());
        row.push(snapshot.transact_time.to_string());

        push_levels(&mut row, &snapshot.best_bids);
        push_levels(&mut row, &snapshot.best_asks);
        push_levels(&mut row, &snapshot.worst_bids);
        push_levels(&mut row, &snapshot.worst_asks);

        let stats = &snapshot.stats;
        row.push(stats.cumulative_volume.to_string());
        row.push(format_cents(stats.last_price));
        row.push(stats.cumulative_trade_orders.to_string());
        row.push(stats.number_of_trades.to_string());
        row.push(format_cents(stats.opening_price_cents()));

        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
