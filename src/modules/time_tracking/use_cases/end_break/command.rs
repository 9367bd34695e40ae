use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndBreak {
    pub user_id: String,
    pub break_id: String,
    pub at: DateTime<Utc>,
}
