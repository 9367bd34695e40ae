use crate::modules::time_tracking::core::breaks::{Break, open_break};
use crate::modules::time_tracking::core::time_entry::TimeEntry;

/// A user's clock as the decide functions see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockState {
    NoActiveEntry,
    Active { entry: TimeEntry, breaks: Vec<Break> },
}

impl ClockState {
    pub fn from_open_entry(entry: Option<TimeEntry>, breaks: Vec<Break>) -> Self {
        match entry {
            Some(entry) if entry.is_open() => ClockState::Active { entry, breaks },
            _ => ClockState::NoActiveEntry,
        }
    }

    pub fn active_entry(&self) -> Option<&TimeEntry> {
        match self {
            ClockState::Active { entry, .. } => Some(entry),
            ClockState::NoActiveEntry => None,
        }
    }

    pub fn open_break(&self) -> Option<&Break> {
        match self {
            ClockState::Active { breaks, .. } => open_break(breaks),
            ClockState::NoActiveEntry => None,
        }
    }
}
