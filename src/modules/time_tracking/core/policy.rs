use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc, Weekday};

use crate::modules::time_tracking::core::duration::{
    DurationError, WeekBounds, calendar_date, day_start, week_bounds,
};

pub const DAILY_REGULAR_HOURS: f64 = 8.0;
pub const DAILY_COMPENSATED_MINUTES: f64 = 30.0;

/// Thresholds and calendar settings every aggregation runs under.
///
/// Weekly totals are the sum of per-day splits; there is no separate weekly
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountingPolicy {
    pub daily_regular_hours: f64,
    pub compensated_break_minutes: f64,
    pub utc_offset: FixedOffset,
    pub week_start: Weekday,
}

impl Default for AccountingPolicy {
    fn default() -> Self {
        Self {
            daily_regular_hours: DAILY_REGULAR_HOURS,
            compensated_break_minutes: DAILY_COMPENSATED_MINUTES,
            utc_offset: Utc.fix(),
            week_start: Weekday::Sun,
        }
    }
}

impl AccountingPolicy {
    pub fn calendar_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        calendar_date(timestamp, self.utc_offset)
    }

    /// `[start of date, start of next day)` as UTC instants.
    pub fn day_window(
        &self,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), DurationError> {
        let next = date.succ_opt().ok_or(DurationError::DateOutOfRange { date })?;
        Ok((day_start(date, self.utc_offset)?, day_start(next, self.utc_offset)?))
    }

    pub fn week_bounds(&self, anchor: NaiveDate) -> Result<WeekBounds, DurationError> {
        week_bounds(anchor, self.week_start, self.utc_offset)
    }
}
