use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One work session. At most one entry per user is open (`is_complete ==
/// false`) at any moment; `clock_out`, once set, is never before `clock_in`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl TimeEntry {
    pub fn open(
        id: impl Into<String>,
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        job_id: impl Into<String>,
        clock_in: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            project_id: project_id.into(),
            job_id: job_id.into(),
            clock_in,
            clock_out: None,
            is_complete: false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_complete
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn close(&mut self, clock_out: DateTime<Utc>) {
        self.clock_out = Some(clock_out);
        self.is_complete = true;
    }

    /// `clock_out` for closed entries, `now` as a provisional end otherwise.
    pub fn end_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.clock_out.unwrap_or(now)
    }
}
