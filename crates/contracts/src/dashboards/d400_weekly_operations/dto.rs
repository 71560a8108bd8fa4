use serde::{Deserialize, Serialize};

use crate::shared::week_key::WeekKey;

/// One row of the weekly operations chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotalRow {
    /// Aggregation bucket, e.g. "2024-W02"
    pub week: WeekKey,
    /// Cases received from purchase orders
    pub received_cases: f64,
    /// Cases shipped against sales orders
    pub shipped_cases: f64,
    /// Labor hours clocked in the week
    pub labor_hours: f64,
    /// Cases handled per labor hour; 0 when no hours were recorded
    pub efficiency: f64,
}

/// Running totals carried forward week over week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeRow {
    pub week: WeekKey,
    pub cumulative_received: f64,
    pub cumulative_shipped: f64,
}

/// Total shipped cases for one store across all weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreTotal {
    pub store: String,
    pub total: f64,
}

/// One (store, week) pair with sales activity
///
/// The series is sparse: pairs with zero activity are omitted and the
/// chart layer treats missing entries as gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreWeekEntry {
    pub store: String,
    pub week: WeekKey,
    pub cases: f64,
}

/// Input source a warning or diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Sales,
    Purchases,
    Labor,
}

/// Non-fatal condition reported alongside an otherwise successful dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWarning {
    pub source: SourceKind,
    pub message: String,
}

/// Per-source counters for records skipped during aggregation
///
/// Skips never abort a run; these counts exist for diagnostic display
/// ("3 purchase rows had unparseable dates") next to the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipStats {
    /// A required field was absent or empty after alias resolution
    pub missing_field: u64,
    /// Quantity or hours value was non-numeric, zero or negative
    pub invalid_number: u64,
    /// Product name not present in the catalog index
    pub unknown_product: u64,
    /// Date failed every parse strategy
    pub invalid_date: u64,
}

impl SkipStats {
    pub fn total(&self) -> u64 {
        self.missing_field + self.invalid_number + self.unknown_product + self.invalid_date
    }
}

/// Skip counters for all three record sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDiagnostics {
    pub sales: SkipStats,
    pub purchases: SkipStats,
    pub labor: SkipStats,
}

/// Complete output of one aggregation run
///
/// This is the only contract the presentation layer depends on; it stays
/// stable even as ingestion or rendering changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyOperationsDataset {
    /// One row per observed week, ascending by week key
    pub weekly_totals: Vec<WeeklyTotalRow>,
    /// Running sums derived from `weekly_totals`, same order
    pub cumulative_totals: Vec<CumulativeRow>,
    /// Top stores by total shipped cases, descending
    pub store_rankings: Vec<StoreTotal>,
    /// Every store with activity, descending by total
    pub all_store_totals: Vec<StoreTotal>,
    /// Sparse per-store weekly series, sorted by (store, week)
    pub store_week_series: Vec<StoreWeekEntry>,
    /// Degraded-source warnings (a source contributed zero buckets)
    pub warnings: Vec<SourceWarning>,
    /// Per-source skipped-record counters
    pub diagnostics: SourceDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_stats_total() {
        let stats = SkipStats {
            missing_field: 2,
            invalid_number: 1,
            unknown_product: 3,
            invalid_date: 4,
        };
        assert_eq!(stats.total(), 10);
        assert_eq!(SkipStats::default().total(), 0);
    }

    #[test]
    fn test_source_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SourceKind::Purchases).unwrap(),
            "\"purchases\""
        );
    }
}
