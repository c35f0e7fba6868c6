use crate::invariants::{RequestPath, UserAgent};

/// One row of the access log. `timestamp` stays raw; only the hourly
/// histogram reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub path: RequestPath,
    pub timestamp: String,
    pub browser: UserAgent,
    pub status: i64,
    pub size: i64,
}
