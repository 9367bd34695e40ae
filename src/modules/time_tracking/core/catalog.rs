use serde::{Deserialize, Serialize};
use std::fmt;

use crate::modules::time_tracking::core::decision::DecideError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub code: String,
    pub title: String,
    pub project_id: String,
    pub is_active: bool,
}

/// A job code in canonical form: trimmed and upper-cased. Lookups compare
/// `JobCode`s only, so case-insensitivity lives here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobCode(String);

impl JobCode {
    pub fn parse(raw: &str) -> Result<Self, DecideError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DecideError::MissingField("job_code"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
