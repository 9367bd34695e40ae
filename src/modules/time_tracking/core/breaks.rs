use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::time_tracking::core::duration::{DurationError, elapsed_hours, elapsed_seconds};
use crate::modules::time_tracking::core::policy::DAILY_COMPENSATED_MINUTES;

/// A rest interval inside one time entry. An entry has at most one open break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub id: String,
    pub time_entry_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl Break {
    pub fn open(
        id: impl Into<String>,
        time_entry_id: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            time_entry_id: time_entry_id.into(),
            start_time,
            end_time: None,
            is_complete: false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_complete
    }

    pub fn close(&mut self, end_time: DateTime<Utc>) {
        self.end_time = Some(end_time);
        self.is_complete = true;
    }
}

pub fn open_break(breaks: &[Break]) -> Option<&Break> {
    breaks.iter().find(|b| b.is_open())
}

/// Minutes spent on closed breaks. Open breaks never count here.
pub fn total_break_minutes(breaks: &[Break]) -> Result<f64, DurationError> {
    breaks
        .iter()
        .filter(|b| b.is_complete)
        .filter_map(|b| b.end_time.map(|end| (b.start_time, end)))
        .try_fold(0.0, |total, (start, end)| -> Result<f64, DurationError> {
            Ok(total + elapsed_hours(elapsed_seconds(start, end)?) * 60.0)
        })
}

/// In-progress seconds of the open break, for live timers.
pub fn live_break_seconds(breaks: &[Break], now: DateTime<Utc>) -> i64 {
    open_break(breaks)
        .and_then(|b| elapsed_seconds(b.start_time, now).ok())
        .unwrap_or(0)
}

/// Default-policy form of [`deductible_beyond`]: the 30 minute allowance.
/// Production paths pass `AccountingPolicy::compensated_break_minutes`.
pub fn deductible_break_minutes(total_break_minutes: f64) -> f64 {
    deductible_beyond(total_break_minutes, DAILY_COMPENSATED_MINUTES)
}

/// Break minutes left over once `compensated_minutes` are paid for.
pub fn deductible_beyond(total_break_minutes: f64, compensated_minutes: f64) -> f64 {
    (total_break_minutes - compensated_minutes).max(0.0)
}
