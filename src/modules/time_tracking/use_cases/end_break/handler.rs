use std::sync::Arc;

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::ports::{BreakStore, TimeEntryStore};
use crate::modules::time_tracking::use_cases::end_break::command::EndBreak;
use crate::modules::time_tracking::use_cases::end_break::decide::decide_end_break;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::in_flight::InFlightRequests;

pub struct EndBreakHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    in_flight: Arc<InFlightRequests>,
}

impl<TEntries, TBreaks> EndBreakHandler<TEntries, TBreaks>
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

    pub async fn handle(&self, command: EndBreak) -> Result<Break, ApplicationError> {
        let Some(_guard) = self.in_flight.try_begin(&command.user_id) else {
            tracing::warn!(user_id = %command.user_id, "break end rejected: request in flight");
            return Err(DecideError::RequestInFlight.into());
        };

        let brk = self.breaks.find_break(&command.break_id).await?;
        let parent = match &brk {
            Some(b) => self.entries.find_entry(&b.time_entry_id).await?,
            None => None,
        };

        let closed = match decide_end_break(brk.as_ref(), parent.as_ref(), &command) {
            Decision::Accepted(closed) => closed,
            Decision::Rejected { reason } => {
                tracing::warn!(%reason, break_id = %command.break_id, "break end rejected");
                return Err(reason.into());
            }
        };

        let stored = self
            .breaks
            .update_break_end(&closed.id, command.at)
            .await
            .inspect_err(|error| tracing::error!(%error, "break end failed to persist"))?;
        match stored {
            Some(brk) => {
                tracing::info!(break_id = %brk.id, "break ended");
                Ok(brk)
            }
            None => Err(DecideError::BreakAlreadyClosed.into()),
        }
    }
}
