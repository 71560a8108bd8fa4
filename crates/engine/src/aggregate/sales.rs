use super::SalesAggregate;
use crate::catalog::ProductIndex;
use crate::shared::fields::{aliases, resolve, resolve_str, value_f64, RawRecord};
use crate::shared::week::week_key_for;

/// Fold sales order rows into shipped-case totals per week and per
/// (store, week)
pub fn aggregate_sales(records: &[RawRecord], index: &ProductIndex) -> SalesAggregate {
    let mut agg = SalesAggregate::default();

    for record in records {
        let (Some(product), Some(store)) = (
            resolve_str(record, aliases::PRODUCT_NAME),
            resolve_str(record, aliases::STORE),
        ) else {
            agg.skips.missing_field += 1;
            tracing::debug!("sales row skipped: missing product or customer");
            continue;
        };
        let Some(quantity_raw) = resolve(record, aliases::QUANTITY) else {
            agg.skips.missing_field += 1;
            tracing::debug!(product = %product, "sales row skipped: missing quantity");
            continue;
        };
        // is_finite: "inf" parses as f64 and would poison cumulative sums
        let quantity = match value_f64(quantity_raw) {
            Some(q) if q.is_finite() && q > 0.0 => q,
            _ => {
                agg.skips.invalid_number += 1;
                tracing::debug!(product = %product, "sales row skipped: quantity not a positive number");
                continue;
            }
        };
        let Some(units_per_case) = index.units_per_case(&product) else {
            agg.skips.unknown_product += 1;
            tracing::debug!(product = %product, "sales row skipped: product not in catalog");
            continue;
        };
        let Some(week) = resolve(record, aliases::DELIVERY_DATE).and_then(week_key_for) else {
            agg.skips.invalid_date += 1;
            tracing::debug!(product = %product, "sales row skipped: unparseable delivery date");
            continue;
        };

        // Fractional cases accumulate as-is; rounding belongs to display
        let cases = quantity / units_per_case as f64;
        *agg.week_cases.entry(week.clone()).or_insert(0.0) += cases;
        *agg.store_week_cases.entry((store, week)).or_insert(0.0) += cases;
    }

    agg
}
