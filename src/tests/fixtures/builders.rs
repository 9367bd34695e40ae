use chrono::{DateTime, Utc};

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::tests::fixtures::at;

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeEntry::open("te-1", "user-1", "prj-web", "job-101", at(9, 0)),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
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

    pub fn job_id(mut self, v: impl Into<String>) -> Self {
        self.inner.job_id = v.into();
        self
    }

    pub fn clock_in(mut self, v: DateTime<Utc>) -> Self {
        self.inner.clock_in = v;
        self
    }

    pub fn closed(mut self, clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> Self {
        self.inner.clock_in = clock_in;
        self.inner.close(clock_out);
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

pub struct BreakBuilder {
    inner: Break,
}

impl Default for BreakBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl BreakBuilder {
    pub fn new() -> Self {
        Self {
            inner: Break::open("b-1", "te-1", at(12, 0)),
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn time_entry_id(mut self, v: impl Into<String>) -> Self {
        self.inner.time_entry_id = v.into();
        self
    }

    pub fn starting(mut self, v: DateTime<Utc>) -> Self {
        self.inner.start_time = v;
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.inner.start_time = start;
        self.inner.close(end);
        self
    }

    pub fn build(self) -> Break {
        self.inner
    }
}

#[cfg(test)]
mod builders_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_build_an_open_entry_by_default() {
        let entry = TimeEntryBuilder::default().build();
        assert_eq!(entry.id, "te-1");
        assert_eq!(entry.user_id, "user-1");
        assert_eq!(entry.clock_in, at(9, 0));
        assert!(entry.is_open());
    }

    #[rstest]
    fn it_should_close_entries_and_breaks_on_request() {
        let entry = TimeEntryBuilder::new().closed(at(8, 0), at(9, 0)).build();
        assert_eq!(entry.clock_out, Some(at(9, 0)));
        assert!(entry.is_complete);

        let brk = BreakBuilder::new().between(at(10, 0), at(10, 5)).build();
        assert_eq!(brk.end_time, Some(at(10, 5)));
        assert!(brk.is_complete);
    }
}
