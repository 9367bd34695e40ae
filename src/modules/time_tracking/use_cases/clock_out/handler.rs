// Clock-out handler closes the active entry and refreshes the summaries.
//
// Responsibilities
// - Hold the per-user in-flight guard for the duration of the request.
// - Close the entry and any open break at the clock-out instant in one
//   conditional store write that only matches open rows.
// - Rebuild the day of the entry's clock-in and the week containing it.

use serde::Serialize;
use std::sync::Arc;

use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::ports::{BreakStore, SummaryStore, TimeEntryStore};
use crate::modules::time_tracking::core::state::ClockState;
use crate::modules::time_tracking::core::summaries::{DayTotals, WeeklyReport};
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::build_summaries::builder::SummaryBuilder;
use crate::modules::time_tracking::use_cases::clock_out::command::ClockOut;
use crate::modules::time_tracking::use_cases::clock_out::decide::decide_clock_out;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::in_flight::InFlightRequests;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOutOutcome {
    pub entry: TimeEntry,
    pub daily: DayTotals,
    pub weekly: WeeklyReport,
}

pub struct ClockOutHandler<TEntries, TBreaks, TSummaries>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
    TSummaries: SummaryStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    summaries: Arc<SummaryBuilder<TEntries, TBreaks, TSummaries>>,
    in_flight: Arc<InFlightRequests>,
}

impl<TEntries, TBreaks, TSummaries> ClockOutHandler<TEntries, TBreaks, TSummaries>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
    TSummaries: SummaryStore + Send + Sync + 'static,
{
    pub fn new(
        entries: Arc<TEntries>,
        breaks: Arc<TBreaks>,
        summaries: Arc<SummaryBuilder<TEntries, TBreaks, TSummaries>>,
        in_flight: Arc<InFlightRequests>,
    ) -> Self {
        Self {
            entries,
            breaks,
            summaries,
            in_flight,
        }
    }

    pub async fn handle(&self, command: ClockOut) -> Result<ClockOutOutcome, ApplicationError> {
        let Some(_guard) = self.in_flight.try_begin(&command.user_id) else {
            tracing::warn!(user_id = %command.user_id, "clock-out rejected: request in flight");
            return Err(DecideError::RequestInFlight.into());
        };

        let open = self.entries.find_open_entry(&command.user_id).await?;
        let breaks = match &open {
            Some(entry) if entry.id == command.time_entry_id => {
                self.breaks.list_breaks(&entry.id).await?
            }
            _ => Vec::new(),
        };
        let state = ClockState::from_open_entry(open, breaks);
        let target = match state.active_entry() {
            Some(entry) if entry.id == command.time_entry_id => None,
            _ => self.entries.find_entry(&command.time_entry_id).await?,
        };

        let plan = match decide_clock_out(&state, target.as_ref(), &command) {
            Decision::Accepted(plan) => plan,
            Decision::Rejected { reason } => {
                tracing::warn!(%reason, time_entry_id = %command.time_entry_id, "clock-out rejected");
                return Err(reason.into());
            }
        };

        let Some(closed) = self
            .entries
            .close_entry(
                &plan.time_entry_id,
                &command.user_id,
                plan.clock_out,
                plan.close_break.as_deref(),
            )
            .await?
        else {
            tracing::warn!(time_entry_id = %plan.time_entry_id, "entry closed concurrently");
            return Err(DecideError::EntryNotFound.into());
        };
        let entry = closed.entry;
        match (&plan.close_break, &closed.closed_break) {
            (_, Some(brk)) => tracing::info!(break_id = %brk.id, "break closed by clock-out"),
            (Some(break_id), None) => {
                tracing::warn!(%break_id, "break was already closed at clock-out")
            }
            (None, None) => {}
        }
        tracing::info!(user_id = %entry.user_id, time_entry_id = %entry.id, "clocked out");

        let date = self.summaries.policy().calendar_date(entry.clock_in);
        let (daily, weekly) = self
            .summaries
            .rebuild(&entry.user_id, date)
            .await
            .inspect_err(|error| tracing::error!(%error, %date, "summary rebuild failed after clock-out"))?;

        Ok(ClockOutOutcome {
            entry,
            daily,
            weekly,
        })
    }
}
