// In memory implementation of the time entry, break and summary ports.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep every table behind one lock so the uniqueness checks and the writes
//   they guard happen in a single critical section.
// - Reject a second open entry per user and a second open break per entry.
// - Close entries and breaks only when they are still open. Clock-out closes
//   the entry and its open break under the same lock.

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::ports::{
    BreakStore, ClosedEntry, StoreError, SummaryStore, TimeEntryStore,
};
use crate::modules::time_tracking::core::summaries::{DailySummary, SummaryKey, WeeklyReport};
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    entries: Vec<TimeEntry>,
    breaks: Vec<Break>,
    daily: HashMap<SummaryKey, DailySummary>,
    weekly: HashMap<(String, NaiveDate), WeeklyReport>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    is_offline: bool,
    delay_lookup_ms: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Slows down open-entry lookups so tests can interleave requests.
    pub fn set_delay_lookup_ms(&self, ms: u64) {
        self.delay_lookup_ms.store(ms, Ordering::SeqCst);
    }

    /// Stands in for the external approval workflow.
    pub async fn approve_weekly_report(&self, user_id: &str, week_start_date: NaiveDate) -> bool {
        let mut tables = self.tables.write().await;
        match tables.weekly.get_mut(&(user_id.to_string(), week_start_date)) {
            Some(report) => {
                report.is_approved = true;
                true
            }
            None => false,
        }
    }

    pub async fn entry_count(&self, user_id: &str) -> usize {
        let tables = self.tables.read().await;
        tables.entries.iter().filter(|e| e.belongs_to(user_id)).count()
    }

    pub async fn daily_row_count(&self) -> usize {
        self.tables.read().await.daily.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("Store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TimeEntryStore for InMemoryStore {
    async fn find_open_entry(&self, user_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let delay = self.delay_lookup_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .iter()
            .find(|e| e.belongs_to(user_id) && e.is_open())
            .cloned())
    }

    async fn find_entry(&self, time_entry_id: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().find(|e| e.id == time_entry_id).cloned())
    }

    async fn insert_entry(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let has_open = tables
            .entries
            .iter()
            .any(|e| e.belongs_to(&entry.user_id) && e.is_open());
        if entry.is_open() && has_open {
            return Err(StoreError::OpenEntryExists {
                user_id: entry.user_id,
            });
        }
        tables.entries.push(entry.clone());
        Ok(entry)
    }

    async fn update_entry_clock_out(
        &self,
        time_entry_id: &str,
        user_id: &str,
        clock_out: DateTime<Utc>,
    ) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let Some(entry) = tables
            .entries
            .iter_mut()
            .find(|e| e.id == time_entry_id && e.belongs_to(user_id) && e.is_open())
        else {
            return Ok(None);
        };
        entry.close(clock_out);
        Ok(Some(entry.clone()))
    }

    async fn close_entry(
        &self,
        time_entry_id: &str,
        user_id: &str,
        clock_out: DateTime<Utc>,
        close_break: Option<&str>,
    ) -> Result<Option<ClosedEntry>, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .entries
            .iter()
            .position(|e| e.id == time_entry_id && e.belongs_to(user_id) && e.is_open())
        else {
            return Ok(None);
        };

        let open_break = close_break.and_then(|break_id| {
            tables
                .breaks
                .iter()
                .position(|b| b.id == break_id && b.time_entry_id == time_entry_id && b.is_open())
        });
        let closed_break = open_break.map(|index| {
            let brk = &mut tables.breaks[index];
            brk.close(clock_out);
            brk.clone()
        });
        let entry = &mut tables.entries[index];
        entry.close(clock_out);
        Ok(Some(ClosedEntry {
            entry: entry.clone(),
            closed_break,
        }))
    }

    async fn list_entries(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut items: Vec<TimeEntry> = tables
            .entries
            .iter()
            .filter(|e| e.belongs_to(user_id) && e.clock_in >= from && e.clock_in < to)
            .cloned()
            .collect();
        items.sort_by_key(|e| e.clock_in);
        Ok(items)
    }

    async fn list_entries_by_user(
        &self,
        user_id: &str,
        offset: u64,
        limit: u64,
        sort_by_clock_in_desc: bool,
    ) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut items: Vec<TimeEntry> = tables
            .entries
            .iter()
            .filter(|e| e.belongs_to(user_id))
            .cloned()
            .collect();

        items.sort_by_key(|e| e.clock_in);
        if sort_by_clock_in_desc {
            items.reverse();
        }

        let start = offset as usize;
        if start >= items.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(limit as usize).min(items.len());
        Ok(items[start..end].to_vec())
    }
}

#[async_trait::async_trait]
impl BreakStore for InMemoryStore {
    async fn insert_break(&self, brk: Break) -> Result<Break, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let parent_open = tables
            .entries
            .iter()
            .any(|e| e.id == brk.time_entry_id && e.is_open());
        if !parent_open {
            return Err(StoreError::EntryNotOpen {
                time_entry_id: brk.time_entry_id,
            });
        }
        let has_open_break = tables
            .breaks
            .iter()
            .any(|b| b.time_entry_id == brk.time_entry_id && b.is_open());
        if has_open_break {
            return Err(StoreError::OpenBreakExists {
                time_entry_id: brk.time_entry_id,
            });
        }
        tables.breaks.push(brk.clone());
        Ok(brk)
    }

    async fn find_break(&self, break_id: &str) -> Result<Option<Break>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.breaks.iter().find(|b| b.id == break_id).cloned())
    }

    async fn update_break_end(
        &self,
        break_id: &str,
        end_time: DateTime<Utc>,
    ) -> Result<Option<Break>, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let Some(brk) = tables
            .breaks
            .iter_mut()
            .find(|b| b.id == break_id && b.is_open())
        else {
            return Ok(None);
        };
        brk.close(end_time);
        Ok(Some(brk.clone()))
    }

    async fn list_breaks(&self, time_entry_id: &str) -> Result<Vec<Break>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut items: Vec<Break> = tables
            .breaks
            .iter()
            .filter(|b| b.time_entry_id == time_entry_id)
            .cloned()
            .collect();
        items.sort_by_key(|b| b.start_time);
        Ok(items)
    }
}

#[async_trait::async_trait]
impl SummaryStore for InMemoryStore {
    async fn upsert_daily_summary(
        &self,
        summary: DailySummary,
    ) -> Result<DailySummary, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        tables.daily.insert(summary.key(), summary.clone());
        Ok(summary)
    }

    async fn list_daily_summaries(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailySummary>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<DailySummary> = tables
            .daily
            .values()
            .filter(|r| r.user_id == user_id && r.date >= from && r.date <= to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.date, &a.project_id, &a.job_id).cmp(&(b.date, &b.project_id, &b.job_id))
        });
        Ok(rows)
    }

    async fn upsert_weekly_report(
        &self,
        report: WeeklyReport,
    ) -> Result<WeeklyReport, StoreError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let key = (report.user_id.clone(), report.week_start_date);
        let is_approved = tables
            .weekly
            .get(&key)
            .is_some_and(|existing| existing.is_approved);
        let stored = WeeklyReport {
            is_approved: report.is_approved || is_approved,
            ..report
        };
        tables.weekly.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find_weekly_report(
        &self,
        user_id: &str,
        week_start_date: NaiveDate,
    ) -> Result<Option<WeeklyReport>, StoreError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .weekly
            .get(&(user_id.to_string(), week_start_date))
            .cloned())
    }
}
