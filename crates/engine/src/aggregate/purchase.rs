use super::PurchaseAggregate;
use crate::catalog::ProductIndex;
use crate::shared::fields::{aliases, resolve, resolve_str, value_f64, RawRecord};
use crate::shared::week::week_key_for;

/// Fold purchase order rows into received-case totals per week
pub fn aggregate_purchases(records: &[RawRecord], index: &ProductIndex) -> PurchaseAggregate {
    let mut agg = PurchaseAggregate::default();

    for record in records {
        let Some(product) = resolve_str(record, aliases::PRODUCT_NAME) else {
            agg.skips.missing_field += 1;
            tracing::debug!("purchase row skipped: missing product name");
            continue;
        };
        let Some(quantity_raw) = resolve(record, aliases::QUANTITY) else {
            agg.skips.missing_field += 1;
            tracing::debug!(product = %product, "purchase row skipped: missing quantity");
            continue;
        };
        // is_finite: "inf" parses as f64 and would poison cumulative sums
        let quantity = match value_f64(quantity_raw) {
            Some(q) if q.is_finite() && q > 0.0 => q,
            _ => {
                agg.skips.invalid_number += 1;
                tracing::debug!(product = %product, "purchase row skipped: quantity not a positive number");
                continue;
            }
        };
        let Some(units_per_case) = index.units_per_case(&product) else {
            agg.skips.unknown_product += 1;
            tracing::debug!(product = %product, "purchase row skipped: product not in catalog");
            continue;
        };
        let Some(week) = resolve(record, aliases::PO_DATE).and_then(week_key_for) else {
            agg.skips.invalid_date += 1;
            tracing::debug!(product = %product, "purchase row skipped: unparseable PO date");
            continue;
        };

        *agg.week_cases.entry(week).or_insert(0.0) += quantity / units_per_case as f64;
    }

    agg
}
