use chrono::NaiveDate;

use crate::modules::time_tracking::core::duration::DurationError;

/// How a failure should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    StateConflict,
    NotFound,
    StorageFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::StateConflict => "state_conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::StorageFailure => "storage_failure",
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("project {0} is not an active project")]
    UnknownProject(String),

    #[error("invalid job code {code}. Available codes: {}", display_codes(.available))]
    InvalidJobCode { code: String, available: Vec<String> },

    #[error("end time must not be before start time")]
    InvalidInterval,

    #[error("date {0} is outside the supported range")]
    DateOutOfRange(NaiveDate),

    #[error("you already have an active time entry, clock out first")]
    AlreadyClockedIn,

    #[error("time entry is not active")]
    EntryNotActive,

    #[error("time entry is already closed")]
    EntryAlreadyClosed,

    #[error("a break is already in progress")]
    BreakAlreadyOpen,

    #[error("break is already closed")]
    BreakAlreadyClosed,

    #[error("another request for this user is still in flight")]
    RequestInFlight,

    #[error("time entry not found")]
    EntryNotFound,

    #[error("break not found")]
    BreakNotFound,
}

fn display_codes(codes: &[String]) -> String {
    if codes.is_empty() {
        "none".to_string()
    } else {
        codes.join(", ")
    }
}

impl DecideError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecideError::MissingField(_)
            | DecideError::UnknownProject(_)
            | DecideError::InvalidJobCode { .. }
            | DecideError::InvalidInterval
            | DecideError::DateOutOfRange(_) => ErrorKind::Validation,
            DecideError::AlreadyClockedIn
            | DecideError::EntryNotActive
            | DecideError::EntryAlreadyClosed
            | DecideError::BreakAlreadyOpen
            | DecideError::BreakAlreadyClosed
            | DecideError::RequestInFlight => ErrorKind::StateConflict,
            DecideError::EntryNotFound | DecideError::BreakNotFound => ErrorKind::NotFound,
        }
    }
}

impl From<DurationError> for DecideError {
    fn from(error: DurationError) -> Self {
        match error {
            DurationError::InvalidInterval { .. } => DecideError::InvalidInterval,
            DurationError::DateOutOfRange { date } => DecideError::DateOutOfRange(date),
        }
    }
}

pub enum Decision<T> {
    Accepted(T),
    Rejected { reason: DecideError },
}

impl<T> Decision<T> {
    pub fn rejected(reason: DecideError) -> Self {
        Decision::Rejected { reason }
    }
}

#[cfg(test)]
mod decide_error_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DecideError::MissingField("job_code"), ErrorKind::Validation)]
    #[case(DecideError::UnknownProject("p".into()), ErrorKind::Validation)]
    #[case(DecideError::InvalidInterval, ErrorKind::Validation)]
    #[case(DecideError::DateOutOfRange(NaiveDate::MAX), ErrorKind::Validation)]
    #[case(DecideError::AlreadyClockedIn, ErrorKind::StateConflict)]
    #[case(DecideError::BreakAlreadyOpen, ErrorKind::StateConflict)]
    #[case(DecideError::EntryAlreadyClosed, ErrorKind::StateConflict)]
    #[case(DecideError::RequestInFlight, ErrorKind::StateConflict)]
    #[case(DecideError::EntryNotFound, ErrorKind::NotFound)]
    #[case(DecideError::BreakNotFound, ErrorKind::NotFound)]
    fn it_should_classify_each_rejection(#[case] error: DecideError, #[case] kind: ErrorKind) {
        assert_eq!(error.kind(), kind);
    }

    #[rstest]
    fn it_should_keep_the_offending_date_when_converting_duration_errors() {
        let error = DecideError::from(DurationError::DateOutOfRange { date: NaiveDate::MIN });
        assert_eq!(error, DecideError::DateOutOfRange(NaiveDate::MIN));
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[rstest]
    fn it_should_list_the_available_codes_for_an_invalid_job_code() {
        let error = DecideError::InvalidJobCode {
            code: "JOB-999".into(),
            available: vec!["JOB-101".into(), "JOB-202".into()],
        };
        assert_eq!(
            error.to_string(),
            "invalid job code JOB-999. Available codes: JOB-101, JOB-202"
        );

        let none = DecideError::InvalidJobCode {
            code: "X".into(),
            available: vec![],
        };
        assert_eq!(none.to_string(), "invalid job code X. Available codes: none");
    }
}
