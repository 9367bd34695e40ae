// Read-only projection of a user's running clock for live timers. Nothing
// here writes to a store; callers poll it with the current time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::modules::time_tracking::core::breaks::{Break, live_break_seconds};
use crate::modules::time_tracking::core::decision::DecideError;
use crate::modules::time_tracking::core::duration::elapsed_seconds;
use crate::modules::time_tracking::core::hours::worked_time;
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::modules::time_tracking::core::ports::{BreakStore, TimeEntryStore};
use crate::modules::time_tracking::core::state::ClockState;
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub user_id: String,
    pub clocked_in: bool,
    pub entry: Option<TimeEntry>,
    pub elapsed_seconds: i64,
    pub open_break: Option<Break>,
    pub open_break_seconds: i64,
    pub completed_break_minutes: f64,
    /// Net hours so far, using `as_of` as a provisional clock-out.
    pub provisional_net_hours: f64,
    pub as_of: DateTime<Utc>,
}

impl SessionView {
    fn idle(user_id: &str, as_of: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            clocked_in: false,
            entry: None,
            elapsed_seconds: 0,
            open_break: None,
            open_break_seconds: 0,
            completed_break_minutes: 0.0,
            provisional_net_hours: 0.0,
            as_of,
        }
    }
}

pub struct CurrentSessionHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    policy: AccountingPolicy,
}

impl<TEntries, TBreaks> CurrentSessionHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    pub fn new(entries: Arc<TEntries>, breaks: Arc<TBreaks>, policy: AccountingPolicy) -> Self {
        Self {
            entries,
            breaks,
            policy,
        }
    }

    pub async fn handle(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionView, ApplicationError> {
        let open = self.entries.find_open_entry(user_id).await?;
        let breaks = match &open {
            Some(entry) => self.breaks.list_breaks(&entry.id).await?,
            None => Vec::new(),
        };
        let state = ClockState::from_open_entry(open, breaks);
        let ClockState::Active { entry, breaks } = &state else {
            return Ok(SessionView::idle(user_id, now));
        };

        // A client clock running behind the server must not produce negative timers.
        let as_of = now.max(entry.clock_in);
        let worked = worked_time(entry, breaks, as_of, self.policy.compensated_break_minutes)
            .map_err(DecideError::from)?;
        let open_break = state.open_break().cloned();

        Ok(SessionView {
            user_id: user_id.to_string(),
            clocked_in: true,
            elapsed_seconds: elapsed_seconds(entry.clock_in, as_of).map_err(DecideError::from)?,
            open_break_seconds: live_break_seconds(breaks, as_of),
            completed_break_minutes: worked.break_minutes,
            provisional_net_hours: worked.net_hours,
            entry: Some(entry.clone()),
            open_break,
            as_of,
        })
    }
}
