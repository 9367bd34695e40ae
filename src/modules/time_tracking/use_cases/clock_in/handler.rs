// Clock-in handler orchestrates the write flow.
//
// Responsibilities
// - Hold the per-user in-flight guard for the duration of the request.
// - Read the catalog and the user's open entry, then call the decider.
// - Insert the entry; the store rejects a concurrent second open entry.

use std::sync::Arc;

use crate::modules::time_tracking::core::catalog::JobCode;
use crate::modules::time_tracking::core::decision::{DecideError, Decision};
use crate::modules::time_tracking::core::ports::{Catalog, StoreError, TimeEntryStore};
use crate::modules::time_tracking::core::state::ClockState;
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;
use crate::modules::time_tracking::use_cases::clock_in::decide::{CatalogSnapshot, decide_clock_in};
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::in_flight::InFlightRequests;

pub struct ClockInHandler<TEntries, TCatalog>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TCatalog: Catalog + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    catalog: Arc<TCatalog>,
    in_flight: Arc<InFlightRequests>,
}

impl<TEntries, TCatalog> ClockInHandler<TEntries, TCatalog>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TCatalog: Catalog + Send + Sync + 'static,
{
    pub fn new(
        entries: Arc<TEntries>,
        catalog: Arc<TCatalog>,
        in_flight: Arc<InFlightRequests>,
    ) -> Self {
        Self {
            entries,
            catalog,
            in_flight,
        }
    }

    pub async fn handle(&self, command: ClockIn) -> Result<TimeEntry, ApplicationError> {
        let Some(_guard) = self.in_flight.try_begin(&command.user_id) else {
            tracing::warn!(user_id = %command.user_id, "clock-in rejected: request in flight");
            return Err(DecideError::RequestInFlight.into());
        };

        let catalog = self.snapshot(&command.job_code).await?;
        let open = self.entries.find_open_entry(&command.user_id).await?;
        let state = ClockState::from_open_entry(open, Vec::new());

        let entry = match decide_clock_in(&state, command, &catalog) {
            Decision::Accepted(entry) => entry,
            Decision::Rejected { reason } => {
                tracing::warn!(%reason, "clock-in rejected");
                return Err(reason.into());
            }
        };

        match self.entries.insert_entry(entry).await {
            Ok(entry) => {
                tracing::info!(user_id = %entry.user_id, time_entry_id = %entry.id, "clocked in");
                Ok(entry)
            }
            Err(StoreError::OpenEntryExists { user_id }) => {
                tracing::warn!(%user_id, "clock-in lost the race to a concurrent request");
                Err(DecideError::AlreadyClockedIn.into())
            }
            Err(error) => {
                tracing::error!(%error, "clock-in failed to persist");
                Err(error.into())
            }
        }
    }

    async fn snapshot(&self, raw_code: &str) -> Result<CatalogSnapshot, ApplicationError> {
        let active_projects = self.catalog.lookup_active_projects().await?;
        let job = match JobCode::parse(raw_code) {
            Ok(code) => self.catalog.lookup_job_by_code(&code).await?,
            Err(_) => None,
        };
        let available_codes = match job {
            Some(_) => Vec::new(),
            None => self
                .catalog
                .lookup_active_jobs(None)
                .await?
                .into_iter()
                .map(|j| j.code)
                .collect(),
        };
        Ok(CatalogSnapshot {
            active_projects,
            job,
            available_codes,
        })
    }
}
