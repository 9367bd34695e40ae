use chrono::{DateTime, Utc};

use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::state::ClockState;
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::clock_out::command::ClockOut;

/// The writes an accepted clock-out performs, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockOutPlan {
    pub time_entry_id: String,
    pub clock_out: DateTime<Utc>,
    /// An open break is closed at the clock-out instant first.
    pub close_break: Option<String>,
}

/// `target` is the entry looked up by id when it is not the user's open one.
pub fn decide_clock_out(
    state: &ClockState,
    target: Option<&TimeEntry>,
    command: &ClockOut,
) -> Decision<ClockOutPlan> {
    if command.time_entry_id.trim().is_empty() {
        return Decision::rejected(DecideError::MissingField("time_entry_id"));
    }

    match state {
        ClockState::Active { entry, .. } if entry.id == command.time_entry_id => {
            let open_break = state.open_break();
            let earliest = open_break.map_or(entry.clock_in, |b| b.start_time.max(entry.clock_in));
            if command.at < earliest {
                return Decision::rejected(DecideError::InvalidInterval);
            }
            Decision::Accepted(ClockOutPlan {
                time_entry_id: entry.id.clone(),
                clock_out: command.at,
                close_break: open_break.map(|b| b.id.clone()),
            })
        }
        _ => match target {
            Some(entry) if entry.belongs_to(&command.user_id) && entry.is_complete => {
                Decision::rejected(DecideError::EntryAlreadyClosed)
            }
            _ => Decision::rejected(DecideError::EntryNotFound),
        },
    }
}
