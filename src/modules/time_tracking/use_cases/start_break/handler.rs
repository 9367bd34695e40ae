use std::sync::Arc;

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::ports::{BreakStore, StoreError, TimeEntryStore};
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::modules::time_tracking::use_cases::start_break::command::StartBreak;
use crate::modules::time_tracking::use_cases::start_break::decide::decide_start_break;
use crate::shared::infrastructure::in_flight::InFlightRequests;

pub struct StartBreakHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    in_flight: Arc<InFlightRequests>,
}

impl<TEntries, TBreaks> StartBreakHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    pub fn new(
        entries: Arc<TEntries>,
        breaks: Arc<TBreaks>,
        in_flight: Arc<InFlightRequests>,
    ) -> Self {
        Self {
            entries,
            breaks,
            in_flight,
        }
    }

    pub async fn handle(&self, command: StartBreak) -> Result<Break, ApplicationError> {
        let Some(_guard) = self.in_flight.try_begin(&command.user_id) else {
            tracing::warn!(user_id = %command.user_id, "break start rejected: request in flight");
            return Err(DecideError::RequestInFlight.into());
        };

        let entry = self.entries.find_entry(&command.time_entry_id).await?;
        let breaks = match &entry {
            Some(e) if e.belongs_to(&command.user_id) && e.is_open() => {
                self.breaks.list_breaks(&e.id).await?
            }
            _ => Vec::new(),
        };

        let brk = match decide_start_break(entry.as_ref(), &breaks, command) {
            Decision::Accepted(brk) => brk,
            Decision::Rejected { reason } => {
                tracing::warn!(%reason, "break start rejected");
                return Err(reason.into());
            }
        };

        match self.breaks.insert_break(brk).await {
            Ok(brk) => {
                tracing::info!(break_id = %brk.id, time_entry_id = %brk.time_entry_id, "break started");
                Ok(brk)
            }
            Err(StoreError::OpenBreakExists { .. }) => Err(DecideError::BreakAlreadyOpen.into()),
            Err(StoreError::EntryNotOpen { .. }) => Err(DecideError::EntryNotActive.into()),
            Err(error) => {
                tracing::error!(%error, "break start failed to persist");
                Err(error.into())
            }
        }
    }
}
