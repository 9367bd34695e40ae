// Ports define what the core needs from the outside world, without implementing it.
//
// Responsibilities
// - Keep the core independent of any database by coding against traits.
// - Storage enforces the uniqueness rules (one open entry per user, one open
//   break per entry) atomically; application-level checks are not enough.
//
// Testing guidance
// - The in memory adapters implement every port for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::catalog::{Job, JobCode, Project};
use crate::modules::time_tracking::core::summaries::{DailySummary, WeeklyReport};
use crate::modules::time_tracking::core::time_entry::TimeEntry;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {user_id} already has an open time entry")]
    OpenEntryExists { user_id: String },

    #[error("time entry {time_entry_id} already has an open break")]
    OpenBreakExists { time_entry_id: String },

    #[error("time entry {time_entry_id} is not open")]
    EntryNotOpen { time_entry_id: String },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Result of closing an entry; `closed_break` is the break closed with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedEntry {
    pub entry: TimeEntry,
    pub closed_break: Option<Break>,
}

#[async_trait]
pub trait TimeEntryStore: Send + Sync {
    async fn find_open_entry(&self, user_id: &str) -> Result<Option<TimeEntry>, StoreError>;

    async fn find_entry(&self, time_entry_id: &str) -> Result<Option<TimeEntry>, StoreError>;

    /// Fails with `OpenEntryExists` when the user already has an open entry.
    async fn insert_entry(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError>;

    /// Closes the entry only if it matches `time_entry_id`, belongs to
    /// `user_id` and is still open. `None` when nothing matched.
    async fn update_entry_clock_out(
        &self,
        time_entry_id: &str,
        user_id: &str,
        clock_out: DateTime<Utc>,
    ) -> Result<Option<TimeEntry>, StoreError>;

    /// Closes the entry and, when `close_break` names one of its open
    /// breaks, that break at the same instant, in one write. Matches the
    /// entry like `update_entry_clock_out`; when it does not match nothing
    /// is written and the result is `None`.
    async fn close_entry(
        &self,
        time_entry_id: &str,
        user_id: &str,
        clock_out: DateTime<Utc>,
        close_break: Option<&str>,
    ) -> Result<Option<ClosedEntry>, StoreError>;

    /// Entries whose `clock_in` is in `[from, to)`.
    async fn list_entries(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError>;

    async fn list_entries_by_user(
        &self,
        user_id: &str,
        offset: u64,
        limit: u64,
        sort_by_clock_in_desc: bool,
    ) -> Result<Vec<TimeEntry>, StoreError>;
}

#[async_trait]
pub trait BreakStore: Send + Sync {
    /// Fails with `EntryNotOpen` or `OpenBreakExists` when the parent entry
    /// cannot take a new break.
    async fn insert_break(&self, brk: Break) -> Result<Break, StoreError>;

    async fn find_break(&self, break_id: &str) -> Result<Option<Break>, StoreError>;

    /// Closes the break only if it is still open. `None` when nothing matched.
    async fn update_break_end(
        &self,
        break_id: &str,
        end_time: DateTime<Utc>,
    ) -> Result<Option<Break>, StoreError>;

    async fn list_breaks(&self, time_entry_id: &str) -> Result<Vec<Break>, StoreError>;
}

#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Updates the row with the same key in place, or inserts it.
    async fn upsert_daily_summary(&self, summary: DailySummary)
    -> Result<DailySummary, StoreError>;

    /// Rows with `from <= date <= to`.
    async fn list_daily_summaries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailySummary>, StoreError>;

    /// Updates or inserts by `(user_id, week_start_date)`. An existing
    /// `is_approved` flag is kept.
    async fn upsert_weekly_report(&self, report: WeeklyReport)
    -> Result<WeeklyReport, StoreError>;

    async fn find_weekly_report(
        &self,
        user_id: &str,
        week_start_date: NaiveDate,
    ) -> Result<Option<WeeklyReport>, StoreError>;
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn lookup_job_by_code(&self, code: &JobCode) -> Result<Option<Job>, StoreError>;

    async fn lookup_active_projects(&self) -> Result<Vec<Project>, StoreError>;

    async fn lookup_active_jobs(&self, project_id: Option<&str>) -> Result<Vec<Job>, StoreError>;
}
