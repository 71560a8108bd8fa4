use std::collections::HashMap;

use crate::error::EngineError;
use crate::shared::fields::{aliases, resolve_f64, resolve_str, RawRecord};

/// Lookup from product name to its units-per-case conversion factor
///
/// Names are trimmed and case-sensitive. A name absent from the index
/// means "unknown product"; lookups return `None` instead of failing.
#[derive(Debug, Clone)]
pub struct ProductIndex {
    units_per_case: HashMap<String, u32>,
}

impl ProductIndex {
    /// Build the index from catalog records
    ///
    /// Rows with a missing name or a units-per-case value that is not a
    /// positive integer are skipped. An empty result is fatal: nothing
    /// downstream can convert quantities to cases without it.
    pub fn build(records: &[RawRecord]) -> Result<Self, EngineError> {
        let mut units_per_case = HashMap::new();

        for record in records {
            let Some(name) = resolve_str(record, aliases::PRODUCT_NAME) else {
                tracing::debug!("catalog row skipped: missing product name");
                continue;
            };
            let Some(units) = resolve_f64(record, aliases::UNITS_PER_CASE) else {
                tracing::debug!(product = %name, "catalog row skipped: missing units per case");
                continue;
            };
            if units <= 0.0 || units.fract() != 0.0 || units > u32::MAX as f64 {
                tracing::debug!(
                    product = %name,
                    units,
                    "catalog row skipped: units per case is not a positive integer"
                );
                continue;
            }
            units_per_case.insert(name, units as u32);
        }

        if units_per_case.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        Ok(Self { units_per_case })
    }

    pub fn units_per_case(&self, name: &str) -> Option<u32> {
        self.units_per_case.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.units_per_case.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units_per_case.is_empty()
    }
}
