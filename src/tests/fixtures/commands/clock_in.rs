use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;
use crate::tests::fixtures::at;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct ClockInDto {
    pub time_entry_id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_code: String,
}

pub struct ClockInBuilder {
    inner: ClockIn,
}

impl Default for ClockInBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ClockInBuilder {
    pub fn new() -> Self {
        let dto: ClockInDto = serde_json::from_str(include_str!("json/clock_in.json")).unwrap();
        Self {
            inner: ClockIn {
                time_entry_id: dto.time_entry_id,
                user_id: dto.user_id,
                project_id: dto.project_id,
                job_code: dto.job_code,
                at: at(9, 0),
            },
        }
    }

    pub fn time_entry_id(mut self, v: impl Into<String>) -> Self {
        self.inner.time_entry_id = v.into();
        self
    }

    pub fn user_id(mut self, v: impl Into<String>) -> Self {
        self.inner.user_id = v.into();
        self
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.project_id = v.into();
        self
    }

    pub fn job_code(mut self, v: impl Into<String>) -> Self {
        self.inner.job_code = v.into();
        self
    }

    pub fn at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.at = v;
        self
    }

    pub fn build(self) -> ClockIn {
        self.inner
    }
}

#[cfg(test)]
mod clock_in_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = ClockInBuilder::default().build();
        assert_eq!(built.time_entry_id, "te-1");
        assert_eq!(built.user_id, "user-1");
        assert_eq!(built.project_id, "prj-web");
        assert_eq!(built.job_code, "job-101");
        assert_eq!(built.at, at(9, 0));
    }

    #[rstest]
    fn setters_override_fields() {
        let built = ClockInBuilder::new()
            .time_entry_id("te-9")
            .user_id("user-9")
            .project_id("prj-ops")
            .job_code("JOB-303")
            .at(at(7, 30))
            .build();
        assert_eq!(built.time_entry_id, "te-9");
        assert_eq!(built.user_id, "user-9");
        assert_eq!(built.project_id, "prj-ops");
        assert_eq!(built.job_code, "JOB-303");
        assert_eq!(built.at, at(7, 30));
    }
}
