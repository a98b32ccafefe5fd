//! Anomaly tracking for parsing and replay.
//!
//! The engine is best-effort: malformed rows, unknown codes, and fills
//! against orders that never rested are swallowed so the replay keeps
//! moving, but each occurrence is counted here so a run can be audited
//! afterwards. Messages are retained up to a cap; counts are exact.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Category of replay anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// Input row with too few fields or unparseable values
    MalformedRow,

    /// Order row carrying an order-type byte outside {1, 2, u}
    UnknownOrderType,

    /// Trade row carrying an exec-type byte outside {f, 4}
    UnknownExecType,

    /// Fill or cancel referencing an order that is not resident
    MissingRestingOrder,

    /// Market/best order dropped because its reference side was empty
    NoReferencePrice,

    /// Order event with non-positive quantity
    ZeroQuantityOrder,
}

impl DiagnosticCategory {
    /// Stable name for reports and exports.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCategory::MalformedRow => "MALFORMED_ROW",
            DiagnosticCategory::UnknownOrderType => "UNKNOWN_ORDER_TYPE",
            DiagnosticCategory::UnknownExecType => "UNKNOWN_EXEC_TYPE",
            DiagnosticCategory::MissingRestingOrder => "MISSING_RESTING_ORDER",
            DiagnosticCategory::NoReferencePrice => "NO_REFERENCE_PRICE",
            DiagnosticCategory::ZeroQuantityOrder => "ZERO_QUANTITY_ORDER",
        }
    }
}

/// Serializable roll-up of a run's anomalies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsSummary {
    /// Total anomalies across all categories
    pub total: u64,

    /// Count per category name
    pub by_category: HashMap<String, u64>,
}

/// Accumulates categorized anomaly counts and a bounded message log.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    counts: HashMap<DiagnosticCategory, u64>,
    messages: Vec<String>,
    max_messages: usize,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Default cap on retained messages.
    pub const DEFAULT_MAX_MESSAGES: usize = 1000;

    /// Create an empty accumulator with the default message cap.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_MESSAGES)
    }

    /// Create an empty accumulator retaining at most `max_messages`
    /// messages (counts are always exact).
    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            counts: HashMap::new(),
            messages: Vec::new(),
            max_messages,
        }
    }

    /// Record one anomaly.
    pub fn record(&mut self, category: DiagnosticCategory, message: impl Into<String>) {
        *self.counts.entry(category).or_insert(0) += 1;
        if self.messages.len() < self.max_messages {
            self.messages
                .push(format!("[{}] {}", category.name(), message.into()));
        }
    }

    /// Count for one category.
    pub fn count(&self, category: DiagnosticCategory) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Total anomalies across all categories.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Retained messages (bounded by the configured cap).
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Roll up counts into a serializable summary.
    pub fn summary(&self) -> DiagnosticsSummary {
        let by_category = self
            .counts
            .iter()
            .map(|(cat, count)| (cat.name().to_string(), *count))
            .collect();

        DiagnosticsSummary {
            total: self.total(),
            by_category,
        }
    }

    /// Export the summary and retained messages as JSON.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        #[derive(Serialize)]
        struct Export<'a> {
            summary: DiagnosticsSummary,
            messages: &'a [String],
        }

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(
            writer,
            &Export {
                summary: self.summary(),
                messages: &self.messages,
            },
        )
        .map_err(std::io::Error::other)
    }
}
