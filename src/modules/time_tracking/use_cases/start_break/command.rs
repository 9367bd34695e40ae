use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartBreak {
    pub break_id: String,
    pub user_id: String,
    pub time_entry_id: String,
    pub at: DateTime<Utc>,
}
