//! Per-source aggregators folding raw records into week buckets
//!
//! The three sources are independent: each reads only the immutable
//! product index and its own record batch. A record that fails any step
//! is skipped and counted, never escalated — logistics exports always
//! contain some malformed rows and the dashboard must stay usable with
//! partial data.

pub mod labor;
pub mod purchase;
pub mod sales;

use std::collections::{BTreeMap, HashMap};

use contracts::dashboards::d400_weekly_operations::SkipStats;
use contracts::shared::week_key::WeekKey;

/// Accumulated value per week bucket
pub type WeekTotals = HashMap<WeekKey, f64>;

/// Accumulated cases per (store, week) bucket; sparse by construction.
///
/// Ordered map on purpose: downstream folds over these buckets sum f64
/// values, and float addition is order-sensitive, so iteration order
/// must not vary between runs for equal inputs to give equal output.
pub type StoreWeekTotals = BTreeMap<(String, WeekKey), f64>;

/// Sales fold result: shipped cases per week and per store-week
#[derive(Debug, Default)]
pub struct SalesAggregate {
    pub week_cases: WeekTotals,
    pub store_week_cases: StoreWeekTotals,
    pub skips: SkipStats,
}

/// Purchase fold result: received cases per week
#[derive(Debug, Default)]
pub struct PurchaseAggregate {
    pub week_cases: WeekTotals,
    pub skips: SkipStats,
}

/// Labor fold result: hours clocked per week
#[derive(Debug, Default)]
pub struct LaborAggregate {
    pub week_hours: WeekTotals,
    pub skips: SkipStats,
}

pub use labor::aggregate_labor;
pub use purchase::aggregate_purchases;
pub use sales::aggregate_sales;
