use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use contracts::shared::week_key::WeekKey;
use serde_json::Value;

/// Normalize an arbitrary date value to its ISO week key
///
/// Returns `None` when nothing parses; callers skip the record rather
/// than substitute a placeholder week.
pub fn week_key_for(value: &Value) -> Option<WeekKey> {
    let date = match value {
        Value::String(s) => parse_date(s.trim())?,
        // Numeric dates arrive as Unix timestamps in seconds
        Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0)?.date_naive(),
        _ => return None,
    };
    Some(week_key_of(date))
}

/// ISO week key of a calendar date
pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    WeekKey::from_iso(iso.year(), iso.week())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    parse_iso(s).or_else(|| parse_delimited(s))
}

/// Well-formed ISO-8601 strings parse directly (tried most specific first)
fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    None
}

/// Ambiguous `A/B/C` or `A-B-C` forms carry no locale tag, so the trial
/// order is fixed: (month, day, year), (day, month, year), (year, month,
/// day). The first calendar-valid candidate wins, even when another
/// ordering would also validate.
fn parse_delimited(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['-', '/']).map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let trials = [
        (parts[2], parts[0], parts[1]), // month, day, year
        (parts[2], parts[1], parts[0]), // day, month, year
        (parts[0], parts[1], parts[2]), // year, month, day
    ];
    for (year, month, day) in trials {
        // Two-digit years are rejected rather than guessed into a century
        if year.len() != 4 {
            continue;
        }
        let (Ok(y), Ok(m), Ok(d)) = (
            year.parse::<i32>(),
            month.parse::<u32>(),
            day.parse::<u32>(),
        ) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            return Some(date);
        }
    }
    None
}
