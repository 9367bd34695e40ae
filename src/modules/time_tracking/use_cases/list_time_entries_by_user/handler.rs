use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::modules::time_tracking::core::decision::DecideError;
use crate::modules::time_tracking::core::hours::{
    WorkedTime, day_worked_times, remaining_allowance, worked_time,
};
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::modules::time_tracking::core::ports::{BreakStore, TimeEntryStore};
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::modules::time_tracking::use_cases::list_time_entries_by_user::projection::TimeEntryView;

pub const DEFAULT_LIMIT: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTimeEntries {
    pub user_id: String,
    pub offset: u64,
    pub limit: u64,
    pub sort_desc: bool,
}

/// Per-entry worked time of one day's closed entries, plus the break
/// allowance they left for an entry still running.
struct DayLedger {
    worked: HashMap<String, WorkedTime>,
    allowance_left: f64,
}

pub struct ListTimeEntriesHandler<TEntries, TBreaks>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    policy: AccountingPolicy,
}

impl<TEntries, TBreaks> ListTimeEntriesHandler<TEntries, TBreaks>
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

    /// Worked hours share the day's break allowance the same way the daily
    /// summary does. Open entries are measured up to `now` against whatever
    /// allowance the day's closed entries left.
    pub async fn handle(
        &self,
        query: ListTimeEntries,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeEntryView>, ApplicationError> {
        let entries = self
            .entries
            .list_entries_by_user(&query.user_id, query.offset, query.limit, query.sort_desc)
            .await?;

        let mut days: HashMap<NaiveDate, DayLedger> = HashMap::new();
        let mut views = Vec::with_capacity(entries.len());
        for entry in entries {
            let date = self.policy.calendar_date(entry.clock_in);
            let ledger = match days.entry(date) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => vacant.insert(self.day_ledger(&query.user_id, date).await?),
            };
            let worked = match ledger.worked.get(&entry.id) {
                Some(worked) => *worked,
                None => {
                    let breaks = self.breaks.list_breaks(&entry.id).await?;
                    let as_of = now.max(entry.clock_in);
                    worked_time(&entry, &breaks, as_of, ledger.allowance_left)
                        .map_err(DecideError::from)?
                }
            };
            views.push(TimeEntryView::new(entry, &worked));
        }
        Ok(views)
    }

    async fn day_ledger(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DayLedger, ApplicationError> {
        let (from, to) = self.policy.day_window(date).map_err(DecideError::from)?;
        let entries = self.entries.list_entries(user_id, from, to).await?;
        let mut with_breaks = Vec::with_capacity(entries.len());
        for entry in entries {
            let breaks = self.breaks.list_breaks(&entry.id).await?;
            with_breaks.push((entry, breaks));
        }

        let worked = day_worked_times(date, &with_breaks, &self.policy).map_err(DecideError::from)?;
        let allowance_left = remaining_allowance(&worked, &self.policy);
        Ok(DayLedger {
            worked: worked
                .into_iter()
                .map(|(entry, time)| (entry.id.clone(), time))
                .collect(),
            allowance_left,
        })
    }
}
