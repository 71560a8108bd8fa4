//! Weekly operations aggregation engine
//!
//! Pure batch transform: four raw record batches in, one dashboard
//! dataset out. No I/O, no shared state; running twice on the same
//! inputs produces identical output. Reading records from disk or the
//! network and rendering the result are both external collaborators.

pub mod aggregate;
pub mod catalog;
pub mod compose;
pub mod error;
pub mod shared;

pub use catalog::ProductIndex;
pub use error::EngineError;
pub use shared::fields::RawRecord;

use contracts::dashboards::d400_weekly_operations::WeeklyOperationsDataset;

/// Run one full aggregation pass over the four input batches
///
/// Fails only on the two fatal conditions: an empty product catalog, or
/// no derivable week keys across all three record sources. Everything
/// else degrades to skipped records and warnings inside the dataset.
pub fn run_weekly_operations(
    catalog: &[RawRecord],
    sales: &[RawRecord],
    purchases: &[RawRecord],
    labor: &[RawRecord],
) -> Result<WeeklyOperationsDataset, EngineError> {
    let index = ProductIndex::build(catalog)?;
    tracing::debug!(products = index.len(), "product index built");

    // The three folds are independent; they share only the immutable
    // index and could run fork-join if batch sizes ever warrant it.
    let sales_agg = aggregate::aggregate_sales(sales, &index);
    let purchase_agg = aggregate::aggregate_purchases(purchases, &index);
    let labor_agg = aggregate::aggregate_labor(labor);

    let dataset = compose::compose(&sales_agg, &purchase_agg, &labor_agg)?;
    tracing::debug!(
        weeks = dataset.weekly_totals.len(),
        stores = dataset.all_store_totals.len(),
        skipped = dataset.diagnostics.sales.total()
            + dataset.diagnostics.purchases.total()
            + dataset.diagnostics.labor.total(),
        "aggregation pass complete"
    );
    Ok(dataset)
}
