use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::core::hours::WorkedTime;

/// One row of the activity log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntryView {
    pub time_entry_id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub in_progress: bool,
    pub break_minutes: f64,
    pub worked_hours: f64,
}

impl TimeEntryView {
    pub fn new(entry: TimeEntry, worked: &WorkedTime) -> Self {
        Self {
            in_progress: entry.is_open(),
            time_entry_id: entry.id,
            user_id: entry.user_id,
            project_id: entry.project_id,
            job_id: entry.job_id,
            clock_in: entry.clock_in,
            clock_out: entry.clock_out,
            break_minutes: worked.break_minutes,
            worked_hours: worked.net_hours,
        }
    }
}
