//! Order book reconstruction CLI.
//!
//! Takes no flags. Searches the working directory and up to four parent
//! levels for `order_new.csv`, reads the order and trade streams found
//! beside each other, replays the session, and writes `book_new.csv`
//! next to the inputs.
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin book_replay
//! ```
//!
//! Exit code 0 on success, 1 on input discovery or load failure.

use std::process::ExitCode;

use lob_replay::io::{discover_inputs, load_orders, load_trades, write_snapshots};
use lob_replay::{Diagnostics, ReplaySession};

fn run() -> Result<(), String> {
    let paths = discover_inputs()
        .map_err(|e| format!("input discovery failed: {e}"))?
        .ok_or_else(|| {
            "could not find order_new.csv in the working directory or its parents".to_string()
        })?;

    println!("Found inputs at: {}", paths.orders.display());

    let mut diagnostics = Diagnostics::new();

    let orders =
        load_orders(&paths.orders, &mut diagnostics).map_err(|e| format!("order load: {e}"))?;
    let trades =
        load_trades(&paths.trades, &mut diagnostics).map_err(|e| format!("trade load: {e}"))?;

    println!("Read {} orders", orders.len());
    println!("Read {} trades", trades.len());

    if orders.is_empty() {
        return Err("no orders loaded".to_string());
    }

    let mut session = ReplaySession::new();
    session.run(&orders, &trades);

    if session.diagnostics().total() + diagnostics.total() > 0 {
        log::warn!(
            "replay finished with {} parse and {} replay anomalies",
            diagnostics.total(),
            session.diagnostics().total()
        );
    }

    write_snapshots(&paths.output, session.snapshots())
        .map_err(|e| format!("output write: {e}"))?;

    println!("Total snapshots: {}", session.snapshots().len());
    println!("Output saved to: {}", paths.output.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("Error: {msg}");
            ExitCode::FAILURE
        }
    }
}
