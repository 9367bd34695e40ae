use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::end_break::command::EndBreak;

/// A break only counts as found when its parent entry belongs to the caller.
pub fn decide_end_break(
    brk: Option<&Break>,
    parent: Option<&TimeEntry>,
    command: &EndBreak,
) -> Decision<Break> {
    if command.break_id.trim().is_empty() {
        return Decision::rejected(DecideError::MissingField("break_id"));
    }
    let owned = parent.is_some_and(|e| e.belongs_to(&command.user_id));
    let Some(brk) = brk.filter(|_| owned) else {
        return Decision::rejected(DecideError::BreakNotFound);
    };
    if brk.is_complete {
        return Decision::rejected(DecideError::BreakAlreadyClosed);
    }
    if command.at < brk.start_time {
        return Decision::rejected(DecideError::InvalidInterval);
    }
    let mut closed = brk.clone();
    closed.close(command.at);
    Decision::Accepted(closed)
}
