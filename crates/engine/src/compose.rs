use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use contracts::dashboards::d400_weekly_operations::{
    CumulativeRow, SourceDiagnostics, SourceKind, SourceWarning, StoreTotal, StoreWeekEntry,
    WeeklyOperationsDataset, WeeklyTotalRow,
};
use contracts::shared::week_key::WeekKey;

use crate::aggregate::{LaborAggregate, PurchaseAggregate, SalesAggregate};
use crate::error::EngineError;

/// Number of stores exposed in `store_rankings`
const RANKING_SIZE: usize = 10;

/// Merge the three per-source aggregates into the dashboard dataset
///
/// The week axis is the union of weeks seen in any source, so a week
/// with only labor data still appears (with zero cases). Fatal only when
/// that union is empty; a single empty source degrades to a warning.
pub fn compose(
    sales: &SalesAggregate,
    purchases: &PurchaseAggregate,
    labor: &LaborAggregate,
) -> Result<WeeklyOperationsDataset, EngineError> {
    let weeks: BTreeSet<WeekKey> = sales
        .week_cases
        .keys()
        .chain(purchases.week_cases.keys())
        .chain(labor.week_hours.keys())
        .cloned()
        .collect();
    if weeks.is_empty() {
        return Err(EngineError::NoWeeklyData);
    }

    let mut weekly_totals = Vec::with_capacity(weeks.len());
    let mut cumulative_totals = Vec::with_capacity(weeks.len());
    let mut cumulative_received = 0.0;
    let mut cumulative_shipped = 0.0;

    for week in &weeks {
        let received_cases = purchases.week_cases.get(week).copied().unwrap_or(0.0);
        let shipped_cases = sales.week_cases.get(week).copied().unwrap_or(0.0);
        let labor_hours = labor.week_hours.get(week).copied().unwrap_or(0.0);
        // Zero labor yields zero efficiency, keeping the series dense
        // for charting instead of producing infinities.
        let efficiency = if labor_hours > 0.0 {
            (received_cases + shipped_cases) / labor_hours
        } else {
            0.0
        };
        weekly_totals.push(WeeklyTotalRow {
            week: week.clone(),
            received_cases,
            shipped_cases,
            labor_hours,
            efficiency,
        });

        cumulative_received += received_cases;
        cumulative_shipped += shipped_cases;
        cumulative_totals.push(CumulativeRow {
            week: week.clone(),
            cumulative_received,
            cumulative_shipped,
        });
    }

    let all_store_totals = store_totals(sales);
    let store_rankings: Vec<StoreTotal> = all_store_totals
        .iter()
        .take(RANKING_SIZE)
        .cloned()
        .collect();
    let store_week_series = store_week_series(sales);

    let warnings = collect_warnings(sales, purchases, labor);
    let diagnostics = SourceDiagnostics {
        sales: sales.skips,
        purchases: purchases.skips,
        labor: labor.skips,
    };

    Ok(WeeklyOperationsDataset {
        weekly_totals,
        cumulative_totals,
        store_rankings,
        all_store_totals,
        store_week_series,
        warnings,
        diagnostics,
    })
}

/// Per-store totals, descending by total with alphabetical tie-break so
/// rankings are reproducible run to run
///
/// The fold walks `store_week_cases` in its (store, week) map order, so
/// each store's buckets are summed in the same sequence every run and
/// the f64 totals come out bit-identical for identical inputs.
fn store_totals(sales: &SalesAggregate) -> Vec<StoreTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for ((store, _week), cases) in &sales.store_week_cases {
        *totals.entry(store.as_str()).or_insert(0.0) += cases;
    }

    let mut list: Vec<StoreTotal> = totals
        .into_iter()
        .map(|(store, total)| StoreTotal {
            store: store.to_string(),
            total,
        })
        .collect();
    list.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.store.cmp(&b.store))
    });
    list
}

/// Sparse store-week series; the bucket map already iterates in
/// (store, week) order, which is the order the contract documents
fn store_week_series(sales: &SalesAggregate) -> Vec<StoreWeekEntry> {
    sales
        .store_week_cases
        .iter()
        .filter(|(_, cases)| **cases != 0.0)
        .map(|((store, week), cases)| StoreWeekEntry {
            store: store.clone(),
            week: week.clone(),
            cases: *cases,
        })
        .collect()
}

fn collect_warnings(
    sales: &SalesAggregate,
    purchases: &PurchaseAggregate,
    labor: &LaborAggregate,
) -> Vec<SourceWarning> {
    let mut warnings = Vec::new();
    let empties = [
        (SourceKind::Sales, sales.week_cases.is_empty()),
        (SourceKind::Purchases, purchases.week_cases.is_empty()),
        (SourceKind::Labor, labor.week_hours.is_empty()),
    ];
    for (source, is_empty) in empties {
        if is_empty {
            tracing::warn!(?source, "source contributed no week buckets");
            warnings.push(SourceWarning {
                source,
                message: "source contributed no week buckets".to_string(),
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(year: i32, week_no: u32) -> WeekKey {
        WeekKey::from_iso(year, week_no)
    }

    fn sales_with(buckets: &[(&str, i32, u32, f64)]) -> SalesAggregate {
        let mut agg = SalesAggregate::default();
        for (store, year, week_no, cases) in buckets {
            *agg.week_cases.entry(week(*year, *week_no)).or_insert(0.0) += cases;
            *agg.store_week_cases
                .entry((store.to_string(), week(*year, *week_no)))
                .or_insert(0.0) += cases;
        }
        agg
    }

    #[test]
    fn test_week_union_includes_labor_only_weeks() {
        let sales = sales_with(&[("Acme", 2024, 2, 3.0)]);
        let mut labor = LaborAggregate::default();
        labor.week_hours.insert(week(2024, 1), 8.0);
        let dataset = compose(&sales, &PurchaseAggregate::default(), &labor).unwrap();

        let weeks: Vec<&str> = dataset
            .weekly_totals
            .iter()
            .map(|row| row.week.as_str())
            .collect();
        assert_eq!(weeks, vec!["2024-W01", "2024-W02"]);
        assert_eq!(dataset.weekly_totals[0].shipped_cases, 0.0);
        assert_eq!(dataset.weekly_totals[0].labor_hours, 8.0);
    }

    #[test]
    fn test_zero_labor_hours_yield_zero_efficiency() {
        let mut purchases = PurchaseAggregate::default();
        purchases.week_cases.insert(week(2024, 2), 5.0);
        let dataset = compose(
            &SalesAggregate::default(),
            &purchases,
            &LaborAggregate::default(),
        )
        .unwrap();
        let row = &dataset.weekly_totals[0];
        assert_eq!(row.received_cases, 5.0);
        assert_eq!(row.efficiency, 0.0);
        assert!(row.efficiency.is_finite());
    }

    #[test]
    fn test_cumulative_sums_are_monotonic() {
        let sales = sales_with(&[
            ("Acme", 2024, 1, 2.0),
            ("Acme", 2024, 2, 1.5),
            ("Acme", 2024, 4, 0.5),
        ]);
        let dataset = compose(
            &sales,
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        )
        .unwrap();

        let mut previous = 0.0;
        for row in &dataset.cumulative_totals {
            assert!(row.cumulative_shipped >= previous);
            previous = row.cumulative_shipped;
        }
        assert_eq!(previous, 4.0);
    }

    #[test]
    fn test_store_ranking_tie_break_is_alphabetical() {
        let sales = sales_with(&[
            ("Zenith", 2024, 1, 5.0),
            ("Acme", 2024, 1, 5.0),
            ("Midway", 2024, 1, 9.0),
        ]);
        let dataset = compose(
            &sales,
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        )
        .unwrap();
        let order: Vec<&str> = dataset
            .store_rankings
            .iter()
            .map(|t| t.store.as_str())
            .collect();
        assert_eq!(order, vec!["Midway", "Acme", "Zenith"]);
    }

    #[test]
    fn test_rankings_cut_at_ten_but_full_list_retained() {
        let buckets: Vec<(String, f64)> = (0..12)
            .map(|i| (format!("Store{:02}", i), (i + 1) as f64))
            .collect();
        let mut sales = SalesAggregate::default();
        for (store, cases) in &buckets {
            sales.week_cases.insert(week(2024, 1), *cases);
            sales
                .store_week_cases
                .insert((store.clone(), week(2024, 1)), *cases);
        }
        let dataset = compose(
            &sales,
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        )
        .unwrap();
        assert_eq!(dataset.store_rankings.len(), 10);
        assert_eq!(dataset.all_store_totals.len(), 12);
        assert_eq!(dataset.store_rankings[0].store, "Store11");
        assert_eq!(dataset.all_store_totals[11].store, "Store00");
    }

    #[test]
    fn test_store_week_series_is_sparse_and_sorted() {
        let sales = sales_with(&[
            ("Beta", 2024, 3, 1.0),
            ("Acme", 2024, 2, 2.0),
            ("Acme", 2024, 5, 1.0),
        ]);
        let dataset = compose(
            &sales,
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        )
        .unwrap();
        let series: Vec<(&str, &str)> = dataset
            .store_week_series
            .iter()
            .map(|e| (e.store.as_str(), e.week.as_str()))
            .collect();
        assert_eq!(
            series,
            vec![
                ("Acme", "2024-W02"),
                ("Acme", "2024-W05"),
                ("Beta", "2024-W03"),
            ]
        );
    }

    #[test]
    fn test_empty_source_becomes_warning_not_error() {
        let sales = sales_with(&[("Acme", 2024, 2, 3.0)]);
        let dataset = compose(
            &sales,
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        )
        .unwrap();
        let sources: Vec<SourceKind> = dataset.warnings.iter().map(|w| w.source).collect();
        assert_eq!(sources, vec![SourceKind::Purchases, SourceKind::Labor]);
    }

    #[test]
    fn test_no_week_keys_anywhere_is_fatal() {
        let result = compose(
            &SalesAggregate::default(),
            &PurchaseAggregate::default(),
            &LaborAggregate::default(),
        );
        assert_eq!(result.unwrap_err(), EngineError::NoWeeklyData);
    }
}
