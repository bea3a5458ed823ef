//! Clock port so day-scoped numbering is deterministic under test.

use chrono::{NaiveDate, NaiveDateTime};

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current calendar day, as used by the public intake numbering scope.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
