use chrono::{DateTime, Utc};

/// `job_code` is the raw user input; it is normalized while deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockIn {
    pub time_entry_id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_code: String,
    pub at: DateTime<Utc>,
}
