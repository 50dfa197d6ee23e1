//! Inclusive calendar date ranges and the `YYYYMMDD` file-date format.

use chrono::Days;

use crate::types::Date;

/// Closed range of calendar days, iterated in ascending daily steps.
///
/// A range whose `start` is after its `end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The range `[end - lookback_days, end]`.
    ///
    /// Saturates at the earliest representable date.
    pub fn ending_on(end: Date, lookback_days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(Date::MIN);
        Self { start, end }
    }

    /// Every day in the range, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days in the range.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render a date the way downstream workflows expect it (`YYYYMMDD`).
pub fn file_date(date: Date) -> String {
    date.format("%Y%m%d").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
