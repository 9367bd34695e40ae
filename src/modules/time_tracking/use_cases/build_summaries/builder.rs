// Summary builder keeps the cached daily and weekly aggregates in step with
// the entries they derive from.
//
// Responsibilities
// - Recompute a day from its closed entries and upsert one row per project/job.
// - Recompute a week from its daily rows unless the report is approved.
// - Serve cached rows, computing and caching a day on first read.
// - Fold a week's rows per project for the distribution report.
//
// Every write is an upsert keyed by the row's identity, so rebuilding the
// same day twice leaves the same rows behind.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::modules::time_tracking::core::decision::DecideError;
use crate::modules::time_tracking::core::hours::aggregate_day;
use crate::modules::time_tracking::core::policy::AccountingPolicy;
use crate::modules::time_tracking::core::ports::{BreakStore, SummaryStore, TimeEntryStore};
use crate::modules::time_tracking::core::summaries::{
    DailySummary, DayTotals, ProjectDistribution, ProjectHours, WeekSummary, WeeklyReport,
};
use crate::modules::time_tracking::use_cases::errors::ApplicationError;

pub struct SummaryBuilder<TEntries, TBreaks, TSummaries>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
    TSummaries: SummaryStore + Send + Sync + 'static,
{
    entries: Arc<TEntries>,
    breaks: Arc<TBreaks>,
    summaries: Arc<TSummaries>,
    policy: AccountingPolicy,
}

impl<TEntries, TBreaks, TSummaries> SummaryBuilder<TEntries, TBreaks, TSummaries>
where
    TEntries: TimeEntryStore + Send + Sync + 'static,
    TBreaks: BreakStore + Send + Sync + 'static,
    TSummaries: SummaryStore + Send + Sync + 'static,
{
    pub fn new(
        entries: Arc<TEntries>,
        breaks: Arc<TBreaks>,
        summaries: Arc<TSummaries>,
        policy: AccountingPolicy,
    ) -> Self {
        Self {
            entries,
            breaks,
            summaries,
            policy,
        }
    }

    pub fn policy(&self) -> &AccountingPolicy {
        &self.policy
    }

    pub async fn upsert_daily_summary(
        &self,
        summary: DailySummary,
    ) -> Result<DailySummary, ApplicationError> {
        Ok(self.summaries.upsert_daily_summary(summary).await?)
    }

    /// Rebuilds the day and then the week containing it.
    pub async fn rebuild(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<(DayTotals, WeeklyReport), ApplicationError> {
        let day = self.rebuild_day(user_id, date).await?;
        let week = self.rebuild_week(user_id, date).await?;
        Ok((day, week))
    }

    pub async fn rebuild_day(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<DayTotals, ApplicationError> {
        let (from, to) = self.policy.day_window(date).map_err(DecideError::from)?;
        let entries = self.entries.list_entries(user_id, from, to).await?;

        let mut with_breaks = Vec::with_capacity(entries.len());
        for entry in entries {
            let breaks = self.breaks.list_breaks(&entry.id).await?;
            with_breaks.push((entry, breaks));
        }

        let aggregate =
            aggregate_day(date, &with_breaks, &self.policy).map_err(DecideError::from)?;
        for bucket in &aggregate.buckets {
            self.summaries
                .upsert_daily_summary(DailySummary::from_bucket(user_id, date, bucket))
                .await?;
        }
        tracing::info!(
            %user_id,
            %date,
            regular_hours = aggregate.regular_hours(),
            overtime_hours = aggregate.overtime_hours(),
            "daily summary rebuilt"
        );

        let rows = self.summaries.list_daily_summaries(user_id, date, date).await?;
        Ok(DayTotals::from_rows(user_id, date, rows))
    }

    /// Approved reports come back unchanged.
    pub async fn rebuild_week(
        &self,
        user_id: &str,
        anchor: NaiveDate,
    ) -> Result<WeeklyReport, ApplicationError> {
        let bounds = self.policy.week_bounds(anchor).map_err(DecideError::from)?;
        let existing = self
            .summaries
            .find_weekly_report(user_id, bounds.start_date)
            .await?;
        if let Some(existing) = existing.filter(|r| r.is_approved) {
            tracing::warn!(
                %user_id,
                week_start = %bounds.start_date,
                "weekly report is approved, not rebuilding"
            );
            return Ok(existing);
        }

        let rows = self
            .summaries
            .list_daily_summaries(user_id, bounds.start_date, bounds.end_date)
            .await?;
        let report = WeeklyReport::from_daily(user_id, &bounds, &rows);
        Ok(self.summaries.upsert_weekly_report(report).await?)
    }

    /// Cached day totals; the day is computed and cached when no row exists.
    pub async fn daily(&self, user_id: &str, date: NaiveDate) -> Result<DayTotals, ApplicationError> {
        let rows = self.summaries.list_daily_summaries(user_id, date, date).await?;
        if rows.is_empty() {
            return self.rebuild_day(user_id, date).await;
        }
        Ok(DayTotals::from_rows(user_id, date, rows))
    }

    pub async fn weekly(
        &self,
        user_id: &str,
        anchor: NaiveDate,
    ) -> Result<WeekSummary, ApplicationError> {
        let bounds = self.policy.week_bounds(anchor).map_err(DecideError::from)?;
        let mut days = Vec::with_capacity(7);
        for date in bounds.days() {
            days.push(self.daily(user_id, date).await?);
        }
        let report = self.rebuild_week(user_id, anchor).await?;
        Ok(WeekSummary { report, days })
    }

    /// Hours per project over the week containing `anchor`, from the same
    /// daily rows the weekly report sums.
    pub async fn project_distribution(
        &self,
        user_id: &str,
        anchor: NaiveDate,
    ) -> Result<ProjectDistribution, ApplicationError> {
        let bounds = self.policy.week_bounds(anchor).map_err(DecideError::from)?;
        let mut rows = Vec::new();
        for date in bounds.days() {
            rows.extend(self.daily(user_id, date).await?.rows);
        }
        Ok(ProjectDistribution {
            user_id: user_id.to_string(),
            week_start_date: bounds.start_date,
            week_end_date: bounds.end_date,
            projects: ProjectHours::by_project(&rows),
        })
    }
}
