use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Canonical aggregation bucket key in the form `YYYY-Www`
///
/// `YYYY` is the ISO week-numbering year (which can differ from the
/// calendar year for dates around New Year) and `ww` is the zero-padded
/// ISO week number. Because the week is always two digits, lexicographic
/// order of the string coincides with chronological order; `Ord` still
/// compares the parsed (year, week) pair rather than trusting the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WeekKey(String);

/// Deserialization goes through [`WeekKey::parse`] so a malformed string
/// on the wire is rejected instead of becoming a key whose accessors
/// silently return 0.
impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WeekKey::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid week key: {:?}", s)))
    }
}

impl WeekKey {
    /// Build a key from an ISO week-numbering year and week number
    pub fn from_iso(year: i32, week: u32) -> Self {
        Self(format!("{}-W{:02}", year, week))
    }

    /// Parse a key from its string form, validating the exact shape
    pub fn parse(s: &str) -> Option<Self> {
        let (year, week) = s.split_once("-W")?;
        if year.len() != 4 || week.len() != 2 {
            return None;
        }
        year.parse::<i32>().ok()?;
        let week_no: u32 = week.parse().ok()?;
        if !(1..=53).contains(&week_no) {
            return None;
        }
        Some(Self(s.to_string()))
    }

    /// ISO week-numbering year component
    pub fn year(&self) -> i32 {
        self.0
            .split_once("-W")
            .and_then(|(y, _)| y.parse().ok())
            .unwrap_or(0)
    }

    /// ISO week number component (01-53)
    pub fn week(&self) -> u32 {
        self.0
            .split_once("-W")
            .and_then(|(_, w)| w.parse().ok())
            .unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for WeekKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year(), self.week()).cmp(&(other.year(), other.week()))
    }
}

impl PartialOrd for WeekKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
