//! Clock port

use chrono::{DateTime, Utc};

/// Source of the current time, stamped on suite reports.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
