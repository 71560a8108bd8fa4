use thiserror::Error;

/// Fatal aggregation errors
///
/// Per-record problems are never errors; they are skipped and counted.
/// Only conditions that make the whole run meaningless surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("product catalog contains no valid entries")]
    EmptyCatalog,

    #[error("no week keys could be derived from any source")]
    NoWeeklyData,
}
