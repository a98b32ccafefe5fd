//! Input CSV parsers for the order and trade streams.
//!
//! Both files are line-oriented and comma-separated with a header on the
//! first line; trailing `\r` and stray whitespace are tolerated, empty
//! lines are skipped. Rows with too few fields or unparseable values are
//! skipped with a diagnostic: load never fails on row content, only on
//! missing or unreadable files.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::diagnostics::{DiagnosticCategory, Diagnostics};
use crate::error::{ReplayError, Result};
use crate::types::{price_to_cents, ExecType, OrderMessage, OrderType, Side, TradeMessage};

/// Minimum field count for an order row.
const ORDER_FIELDS: usize = 8;

/// Minimum field count for a trade row.
const TRADE_FIELDS: usize = 10;

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.is_file() {
        return Err(ReplayError::InputNotFound(path.to_path_buf()));
    }

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?)
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn skip_malformed(diagnostics: &mut Diagnostics, line: u64, reason: &str) {
    log::warn!("skipping row at line {line}: {reason}");
    diagnostics.record(
        DiagnosticCategory::MalformedRow,
        format!("line {line}: {reason}"),
    );
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("")
}

/// Load the order stream.
///
/// Returns every well-formed row in input order; malformed rows are
/// skipped and tallied in `diagnostics`.
pub fn load_orders(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<OrderMessage>> {
    let mut reader = open_reader(path)?;
    let mut orders = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record_line(&record);

        if record.len() < ORDER_FIELDS {
            skip_malformed(
                diagnostics,
                line,
                &format!("{} fields, expected {ORDER_FIELDS}", record.len()),
            );
            continue;
        }

        let parsed = (
            field(&record, 0).parse::<i64>(),
            field(&record, 1).parse::<i64>(),
            field(&record, 2).parse::<i64>(),
            field(&record, 3).parse::<u64>(),
            field(&record, 4).parse::<i64>(),
            field(&record, 6).parse::<f64>(),
            field(&record, 7).parse::<u64>(),
        );

        let (Ok(clock), Ok(seq), Ok(tt), Ok(appl), Ok(side_code), Ok(price), Ok(qty)) = parsed
        else {
            skip_malformed(diagnostics, line, "unparseable numeric field");
            continue;
        };

        let Some(side) = Side::from_code(side_code) else {
            skip_malformed(diagnostics, line, &format!("bad side code {side_code}"));
            continue;
        };

        let type_field = field(&record, 5);
        let Some(order_type) = type_field.bytes().next().and_then(OrderType::from_byte) else {
            log::warn!("skipping row at line {line}: unknown order type {type_field:?}");
            diagnostics.record(
                DiagnosticCategory::UnknownOrderType,
                format!("line {line}: order type {type_field:?}"),
            );
            continue;
        };

        orders.push(OrderMessage {
            clock_at_arrival: clock,
            sequence_no: seq,
            transact_time: tt,
            appl_seq_num: appl,
            side,
            order_type,
            price: price_to_cents(price),
            qty,
        });
    }

    log::info!("loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Load the trade stream.
///
/// Same row policy as [`load_orders`].
pub fn load_trades(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<TradeMessage>> {
    let mut reader = open_reader(path)?;
    let mut trades = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record_line(&record);

        if record.len() < TRADE_FIELDS {
            skip_malformed(
                diagnostics,
                line,
                &format!("{} fields, expected {TRADE_FIELDS}", record.len()),
            );
            continue;
        }

        let parsed = (
            field(&record, 0).parse::<i64>(),
            field(&record, 1).parse::<i64>(),
            field(&record, 2).parse::<i64>(),
            field(&record, 3).parse::<u64>(),
            field(&record, 5).parse::<f64>(),
            field(&record, 6).parse::<u64>(),
            field(&record, 7).parse::<f64>(),
            field(&record, 8).parse::<u64>(),
            field(&record, 9).parse::<u64>(),
        );

        let (Ok(clock), Ok(seq), Ok(tt), Ok(appl), Ok(price), Ok(qty), Ok(money), Ok(bid_ref), Ok(ask_ref)) =
            parsed
        else {
            skip_malformed(diagnostics, line, "unparseable numeric field");
            continue;
        };

        let exec_field = field(&record, 4);
        let Some(exec_type) = exec_field.bytes().next().and_then(ExecType::from_byte) else {
            log::warn!("skipping row at line {line}: unknown exec type {exec_field:?}");
            diagnostics.record(
                DiagnosticCategory::UnknownExecType,
                format!("line {line}: exec type {exec_field:?}"),
            );
            continue;
        };

        trades.push(TradeMessage {
            clock_at_arrival: clock,
            sequence_no: seq,
            transact_time: tt,
            appl_seq_num: appl,
            exec_type,
            price: price_to_cents(price),
            qty,
            money,
            bid_ref,
            ask_ref,
        });
    }

    log::info!("loaded {} trades from {}", trades.len(), path.display());
    Ok(trades)
}
