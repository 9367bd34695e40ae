use crate::modules::time_tracking::core::breaks::{Break, open_break};
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::start_break::command::StartBreak;

/// `entry` is the parent entry as stored, `breaks` its breaks so far.
pub fn decide_start_break(
    entry: Option<&TimeEntry>,
    breaks: &[Break],
    command: StartBreak,
) -> Decision<Break> {
    if command.time_entry_id.trim().is_empty() {
        return Decision::rejected(DecideError::MissingField("time_entry_id"));
    }
    let Some(entry) = entry.filter(|e| e.belongs_to(&command.user_id)) else {
        return Decision::rejected(DecideError::EntryNotFound);
    };
    if entry.is_complete {
        return Decision::rejected(DecideError::EntryNotActive);
    }
    if open_break(breaks).is_some() {
        return Decision::rejected(DecideError::BreakAlreadyOpen);
    }
    if command.at < entry.clock_in {
        return Decision::rejected(DecideError::InvalidInterval);
    }
    Decision::Accepted(Break::open(command.break_id, entry.id.clone(), command.at))
}
