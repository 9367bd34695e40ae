use crate::modules::time_tracking::core::catalog::{Job, JobCode, Project};
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::state::ClockState;
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;

/// What the catalog said about the command's project and job code.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub active_projects: Vec<Project>,
    pub job: Option<Job>,
    pub available_codes: Vec<String>,
}

/// Validation runs before the state check, so a malformed request never
/// reports a conflict.
pub fn decide_clock_in(
    state: &ClockState,
    command: ClockIn,
    catalog: &CatalogSnapshot,
) -> Decision<TimeEntry> {
    if command.user_id.trim().is_empty() {
        return Decision::rejected(DecideError::MissingField("user_id"));
    }
    if command.project_id.trim().is_empty() {
        return Decision::rejected(DecideError::MissingField("project_id"));
    }
    let code = match JobCode::parse(&command.job_code) {
        Ok(code) => code,
        Err(reason) => return Decision::rejected(reason),
    };
    if !catalog
        .active_projects
        .iter()
        .any(|p| p.id == command.project_id)
    {
        return Decision::rejected(DecideError::UnknownProject(command.project_id));
    }
    let Some(job) = catalog.job.as_ref() else {
        return Decision::rejected(DecideError::InvalidJobCode {
            code: code.to_string(),
            available: catalog.available_codes.clone(),
        });
    };

    match state {
        ClockState::NoActiveEntry => Decision::Accepted(TimeEntry::open(
            command.time_entry_id,
            command.user_id,
            command.project_id,
            job.id.clone(),
            command.at,
        )),
        ClockState::Active { .. } => Decision::rejected(DecideError::AlreadyClockedIn),
    }
}

#[cfg(test)]
mod clock_in_decide_tests {
    use super::*;
    use crate::tests::fixtures::at;
    use crate::tests::fixtures::builders::TimeEntryBuilder;
    use crate::tests::fixtures::commands::clock_in::ClockInBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot {
            active_projects: vec![Project {
                id: "prj-web".into(),
                name: "Website Redesign".into(),
                is_active: true,
            }],
            job: Some(Job {
                id: "job-101".into(),
                code: "JOB-101".into(),
                title: "Frontend Development".into(),
                project_id: "prj-web".into(),
                is_active: true,
            }),
            available_codes: vec![],
        }
    }

    #[rstest]
    fn it_should_open_an_entry_when_no_entry_is_active(catalog: CatalogSnapshot) {
        let command = ClockInBuilder::new().at(at(8, 30)).build();
        match decide_clock_in(&ClockState::NoActiveEntry, command, &catalog) {
            Decision::Accepted(entry) => {
                assert_eq!(entry.id, "te-1");
                assert_eq!(entry.user_id, "user-1");
                assert_eq!(entry.project_id, "prj-web");
                assert_eq!(entry.job_id, "job-101");
                assert_eq!(entry.clock_in, at(8, 30));
                assert!(entry.is_open());
            }
            Decision::Rejected { reason } => panic!("expected Accepted, got {reason}"),
        }
    }

    #[rstest]
    fn it_should_reject_a_second_clock_in(catalog: CatalogSnapshot) {
        let state = ClockState::from_open_entry(Some(TimeEntryBuilder::new().build()), vec![]);
        let decision = decide_clock_in(&state, ClockInBuilder::new().build(), &catalog);
        assert!(matches!(
            decision,
            Decision::Rejected {
                reason: DecideError::AlreadyClockedIn
            }
        ));
    }

    #[rstest]
    #[case(ClockInBuilder::new().user_id(" ").build(), DecideError::MissingField("user_id"))]
    #[case(ClockInBuilder::new().project_id("").build(), DecideError::MissingField("project_id"))]
    #[case(ClockInBuilder::new().job_code("  ").build(), DecideError::MissingField("job_code"))]
    #[case(
        ClockInBuilder::new().project_id("prj-gone").build(),
        DecideError::UnknownProject("prj-gone".into())
    )]
    fn it_should_reject_incomplete_or_unknown_input(
        catalog: CatalogSnapshot,
        #[case] command: ClockIn,
        #[case] expected: DecideError,
    ) {
        match decide_clock_in(&ClockState::NoActiveEntry, command, &catalog) {
            Decision::Rejected { reason } => assert_eq!(reason, expected),
            Decision::Accepted(_) => panic!("expected Rejected"),
        }
    }

    #[rstest]
    fn it_should_report_the_available_codes_for_an_unknown_job(mut catalog: CatalogSnapshot) {
        catalog.job = None;
        catalog.available_codes = vec!["JOB-101".into(), "JOB-202".into()];
        let command = ClockInBuilder::new().job_code("job-999").build();
        match decide_clock_in(&ClockState::NoActiveEntry, command, &catalog) {
            Decision::Rejected { reason } => assert_eq!(
                reason,
                DecideError::InvalidJobCode {
                    code: "JOB-999".into(),
                    available: vec!["JOB-101".into(), "JOB-202".into()],
                }
            ),
            Decision::Accepted(_) => panic!("expected Rejected"),
        }
    }

    #[rstest]
    fn it_should_validate_before_checking_the_clock_state(catalog: CatalogSnapshot) {
        let state = ClockState::from_open_entry(Some(TimeEntryBuilder::new().build()), vec![]);
        let command = ClockInBuilder::new().project_id("").build();
        assert!(matches!(
            decide_clock_in(&state, command, &catalog),
            Decision::Rejected {
                reason: DecideError::MissingField("project_id")
            }
        ));
    }
}
