use serde_json::Value;

/// One input row: an ordered mapping from field name to a loosely typed
/// scalar. The four sources do not share a schema, so all field access
/// goes through alias lists rather than fixed struct fields.
pub type RawRecord = serde_json::Map<String, Value>;

/// Recognized field-name aliases per logical field, per source.
///
/// Order matters: the resolver takes the first alias present in the
/// record with a non-empty value. These lists are the documented contract
/// for what spellings the ingestion side may deliver.
pub mod aliases {
    pub static PRODUCT_NAME: &[&str] = &["Product Name", "ProductName", "Name", "Product"];
    pub static UNITS_PER_CASE: &[&str] =
        &["Units Per Case", "UnitsPerCase", "Units/Case", "Case Qty"];
    pub static QUANTITY: &[&str] = &["Quantity", "Qty"];
    pub static STORE: &[&str] = &["Customer", "Store", "Client"];
    pub static DELIVERY_DATE: &[&str] = &["Delivery Date", "DeliveryDate", "Date"];
    pub static PO_DATE: &[&str] = &["PO Date", "Order Date", "Date"];
    pub static CLOCK_IN_DATE: &[&str] = &["Date In", "Clock In", "Date"];
    pub static HOURS: &[&str] = &["Total Less Break", "Hours", "Total Hours"];
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Return the first alias's value that is present and non-empty
pub fn resolve<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| is_present(value))
}

/// Resolve a field to a trimmed, non-empty string
pub fn resolve_str(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    match resolve(record, aliases)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a scalar to a number, accepting numeric strings
///
/// Upstream ingestion may or may not auto-type numeric columns, so a
/// value arriving as `"36"` works the same as `36`.
pub fn value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Resolve a field to a number, coercing numeric strings
pub fn resolve_f64(record: &RawRecord, aliases: &[&str]) -> Option<f64> {
    value_f64(resolve(record, aliases)?)
}
