use super::LaborAggregate;
use crate::shared::fields::{aliases, resolve, value_f64, RawRecord};
use crate::shared::week::week_key_for;

/// Fold labor clock rows into hours-worked totals per week
///
/// Labor rows carry no product reference, so the catalog index is not
/// consulted here.
pub fn aggregate_labor(records: &[RawRecord]) -> LaborAggregate {
    let mut agg = LaborAggregate::default();

    for record in records {
        let Some(hours_raw) = resolve(record, aliases::HOURS) else {
            agg.skips.missing_field += 1;
            tracing::debug!("labor row skipped: missing hours field");
            continue;
        };
        // is_finite: "inf" parses as f64 and must not reach the buckets
        let hours = match value_f64(hours_raw) {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => {
                agg.skips.invalid_number += 1;
                tracing::debug!("labor row skipped: hours not a positive number");
                continue;
            }
        };
        let Some(week) = resolve(record, aliases::CLOCK_IN_DATE).and_then(week_key_for) else {
            agg.skips.invalid_date += 1;
            tracing::debug!("labor row skipped: unparseable clock-in date");
            continue;
        };

        *agg.week_hours.entry(week).or_insert(0.0) += hours;
    }

    agg
}
