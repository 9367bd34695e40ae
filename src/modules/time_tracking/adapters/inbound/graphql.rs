use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::time_tracking::core::breaks::Break;
use crate::modules::time_tracking::core::catalog::{Job, Project};
use crate::modules::time_tracking::core::summaries::{
    DailySummary, DayTotals, ProjectDistribution, ProjectHours, WeekSummary, WeeklyReport,
};
use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;
use crate::modules::time_tracking::use_cases::clock_out::command::ClockOut;
use crate::modules::time_tracking::use_cases::clock_out::handler::ClockOutOutcome;
use crate::modules::time_tracking::use_cases::current_session::handler::SessionView;
use crate::modules::time_tracking::use_cases::end_break::command::EndBreak;
use crate::modules::time_tracking::use_cases::errors::ApplicationError;
use crate::modules::time_tracking::use_cases::list_time_entries_by_user::handler::{
    DEFAULT_LIMIT, ListTimeEntries,
};
use crate::modules::time_tracking::use_cases::list_time_entries_by_user::projection::TimeEntryView;
use crate::modules::time_tracking::use_cases::start_break::command::StartBreak;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlTimeEntry {
    pub time_entry_id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl From<TimeEntry> for GqlTimeEntry {
    fn from(e: TimeEntry) -> Self {
        Self {
            time_entry_id: e.id,
            user_id: e.user_id,
            project_id: e.project_id,
            job_id: e.job_id,
            clock_in: e.clock_in,
            clock_out: e.clock_out,
            is_complete: e.is_complete,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlBreak {
    pub break_id: String,
    pub time_entry_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

impl From<Break> for GqlBreak {
    fn from(b: Break) -> Self {
        Self {
            break_id: b.id,
            time_entry_id: b.time_entry_id,
            start_time: b.start_time,
            end_time: b.end_time,
            is_complete: b.is_complete,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDailySummary {
    pub date: NaiveDate,
    pub day_of_week: u32,
    pub project_id: Option<String>,
    pub job_id: Option<String>,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
}

impl From<DailySummary> for GqlDailySummary {
    fn from(r: DailySummary) -> Self {
        Self {
            date: r.date,
            day_of_week: r.day_of_week,
            project_id: r.project_id,
            job_id: r.job_id,
            regular_hours: r.regular_hours,
            overtime_hours: r.overtime_hours,
            total_hours: r.total_hours,
            break_time: r.break_time,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDayTotals {
    pub user_id: String,
    pub date: NaiveDate,
    pub day_of_week: u32,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
    pub rows: Vec<GqlDailySummary>,
}

impl From<DayTotals> for GqlDayTotals {
    fn from(d: DayTotals) -> Self {
        Self {
            user_id: d.user_id,
            date: d.date,
            day_of_week: d.day_of_week,
            regular_hours: d.regular_hours,
            overtime_hours: d.overtime_hours,
            total_hours: d.total_hours,
            break_time: d.break_time,
            rows: d.rows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeeklyReport {
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
    pub is_approved: bool,
}

impl From<WeeklyReport> for GqlWeeklyReport {
    fn from(w: WeeklyReport) -> Self {
        Self {
            user_id: w.user_id,
            week_start_date: w.week_start_date,
            week_end_date: w.week_end_date,
            regular_hours: w.regular_hours,
            overtime_hours: w.overtime_hours,
            total_hours: w.total_hours,
            break_time: w.break_time,
            is_approved: w.is_approved,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeekSummary {
    pub report: GqlWeeklyReport,
    pub days: Vec<GqlDayTotals>,
}

impl From<WeekSummary> for GqlWeekSummary {
    fn from(w: WeekSummary) -> Self {
        Self {
            report: w.report.into(),
            days: w.days.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlProjectHours {
    pub project_id: Option<String>,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
}

impl From<ProjectHours> for GqlProjectHours {
    fn from(p: ProjectHours) -> Self {
        Self {
            project_id: p.project_id,
            regular_hours: p.regular_hours,
            overtime_hours: p.overtime_hours,
            total_hours: p.total_hours,
            break_time: p.break_time,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlProjectDistribution {
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub projects: Vec<GqlProjectHours>,
}

impl From<ProjectDistribution> for GqlProjectDistribution {
    fn from(d: ProjectDistribution) -> Self {
        Self {
            user_id: d.user_id,
            week_start_date: d.week_start_date,
            week_end_date: d.week_end_date,
            projects: d.projects.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSummaries {
    pub daily: GqlDayTotals,
    pub weekly: GqlWeeklyReport,
}

#[derive(SimpleObject, Clone)]
pub struct GqlClockOut {
    pub entry: GqlTimeEntry,
    pub daily: GqlDayTotals,
    pub weekly: GqlWeeklyReport,
}

impl From<ClockOutOutcome> for GqlClockOut {
    fn from(o: ClockOutOutcome) -> Self {
        Self {
            entry: o.entry.into(),
            daily: o.daily.into(),
            weekly: o.weekly.into(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlSession {
    pub user_id: String,
    pub clocked_in: bool,
    pub entry: Option<GqlTimeEntry>,
    pub elapsed_seconds: i64,
    pub open_break: Option<GqlBreak>,
    pub open_break_seconds: i64,
    pub completed_break_minutes: f64,
    pub provisional_net_hours: f64,
    pub as_of: DateTime<Utc>,
}

impl From<SessionView> for GqlSession {
    fn from(s: SessionView) -> Self {
        Self {
            user_id: s.user_id,
            clocked_in: s.clocked_in,
            entry: s.entry.map(Into::into),
            elapsed_seconds: s.elapsed_seconds,
            open_break: s.open_break.map(Into::into),
            open_break_seconds: s.open_break_seconds,
            completed_break_minutes: s.completed_break_minutes,
            provisional_net_hours: s.provisional_net_hours,
            as_of: s.as_of,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlActivity {
    pub time_entry_id: String,
    pub user_id: String,
    pub project_id: String,
    pub job_id: String,
    pub clock_in: DateTime<Utc>,
    pub clock_out: Option<DateTime<Utc>>,
    pub in_progress: bool,
    pub break_minutes: f64,
    pub worked_hours: f64,
}

impl From<TimeEntryView> for GqlActivity {
    fn from(v: TimeEntryView) -> Self {
        Self {
            time_entry_id: v.time_entry_id,
            user_id: v.user_id,
            project_id: v.project_id,
            job_id: v.job_id,
            clock_in: v.clock_in,
            clock_out: v.clock_out,
            in_progress: v.in_progress,
            break_minutes: v.break_minutes,
            worked_hours: v.worked_hours,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlProject {
    pub id: String,
    pub name: String,
}

impl From<Project> for GqlProject {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlJob {
    pub id: String,
    pub code: String,
    pub title: String,
    pub project_id: String,
}

impl From<Job> for GqlJob {
    fn from(j: Job) -> Self {
        Self {
            id: j.id,
            code: j.code,
            title: j.title,
            project_id: j.project_id,
        }
    }
}

/// Carries the error kind as an extension so clients can branch on it.
fn to_gql_error(error: ApplicationError) -> async_graphql::Error {
    let kind = error.kind();
    async_graphql::Error::new(error.to_string()).extend_with(|_, ext| ext.set("kind", kind.as_str()))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn session(&self, context: &Context<'_>, user_id: String) -> GqlResult<GqlSession> {
        let state = context.data_unchecked::<AppState>();
        let view = state
            .session_handler
            .handle(&user_id, state.clock.now())
            .await
            .map_err(to_gql_error)?;
        Ok(view.into())
    }

    async fn time_entries(
        &self,
        context: &Context<'_>,
        user_id: String,
        offset: Option<i64>,
        limit: Option<i64>,
        sort_desc: Option<bool>,
    ) -> GqlResult<Vec<GqlActivity>> {
        let state = context.data_unchecked::<AppState>();
        let query = ListTimeEntries {
            user_id,
            offset: offset.unwrap_or(0).max(0) as u64,
            limit: limit.map_or(DEFAULT_LIMIT, |l| l.max(0) as u64),
            sort_desc: sort_desc.unwrap_or(true),
        };
        let views = state
            .list_handler
            .handle(query, state.clock.now())
            .await
            .map_err(to_gql_error)?;
        Ok(views.into_iter().map(Into::into).collect())
    }

    async fn daily_summary(
        &self,
        context: &Context<'_>,
        user_id: String,
        date: NaiveDate,
    ) -> GqlResult<GqlDayTotals> {
        let state = context.data_unchecked::<AppState>();
        let totals = state
            .summaries
            .daily(&user_id, date)
            .await
            .map_err(to_gql_error)?;
        Ok(totals.into())
    }

    async fn weekly_summary(
        &self,
        context: &Context<'_>,
        user_id: String,
        date: NaiveDate,
    ) -> GqlResult<GqlWeekSummary> {
        let state = context.data_unchecked::<AppState>();
        let week = state
            .summaries
            .weekly(&user_id, date)
            .await
            .map_err(to_gql_error)?;
        Ok(week.into())
    }

    async fn project_distribution(
        &self,
        context: &Context<'_>,
        user_id: String,
        date: NaiveDate,
    ) -> GqlResult<GqlProjectDistribution> {
        let state = context.data_unchecked::<AppState>();
        let distribution = state
            .summaries
            .project_distribution(&user_id, date)
            .await
            .map_err(to_gql_error)?;
        Ok(distribution.into())
    }

    async fn projects(&self, context: &Context<'_>) -> GqlResult<Vec<GqlProject>> {
        let state = context.data_unchecked::<AppState>();
        let projects = state.catalog_handler.projects().await.map_err(to_gql_error)?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn jobs(
        &self,
        context: &Context<'_>,
        project_id: Option<String>,
    ) -> GqlResult<Vec<GqlJob>> {
        let state = context.data_unchecked::<AppState>();
        let jobs = state
            .catalog_handler
            .jobs(project_id.as_deref())
            .await
            .map_err(to_gql_error)?;
        Ok(jobs.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn clock_in(
        &self,
        context: &Context<'_>,
        user_id: String,
        project_id: String,
        job_code: String,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let command = ClockIn {
            time_entry_id: Uuid::now_v7().to_string(),
            user_id,
            project_id,
            job_code,
            at: state.clock.now(),
        };
        let entry = state
            .clock_in_handler
            .handle(command)
            .await
            .map_err(to_gql_error)?;
        Ok(entry.into())
    }

    async fn clock_out(
        &self,
        context: &Context<'_>,
        user_id: String,
        time_entry_id: String,
    ) -> GqlResult<GqlClockOut> {
        let state = context.data_unchecked::<AppState>();
        let command = ClockOut {
            user_id,
            time_entry_id,
            at: state.clock.now(),
        };
        let outcome = state
            .clock_out_handler
            .handle(command)
            .await
            .map_err(to_gql_error)?;
        Ok(outcome.into())
    }

    async fn start_break(
        &self,
        context: &Context<'_>,
        user_id: String,
        time_entry_id: String,
    ) -> GqlResult<GqlBreak> {
        let state = context.data_unchecked::<AppState>();
        let command = StartBreak {
            break_id: Uuid::now_v7().to_string(),
            user_id,
            time_entry_id,
            at: state.clock.now(),
        };
        let brk = state
            .start_break_handler
            .handle(command)
            .await
            .map_err(to_gql_error)?;
        Ok(brk.into())
    }

    async fn end_break(
        &self,
        context: &Context<'_>,
        user_id: String,
        break_id: String,
    ) -> GqlResult<GqlBreak> {
        let state = context.data_unchecked::<AppState>();
        let command = EndBreak {
            user_id,
            break_id,
            at: state.clock.now(),
        };
        let brk = state
            .end_break_handler
            .handle(command)
            .await
            .map_err(to_gql_error)?;
        Ok(brk.into())
    }

    async fn refresh_summaries(
        &self,
        context: &Context<'_>,
        user_id: String,
        date: NaiveDate,
    ) -> GqlResult<GqlSummaries> {
        let state = context.data_unchecked::<AppState>();
        let (daily, weekly) = state
            .summaries
            .rebuild(&user_id, date)
            .await
            .map_err(to_gql_error)?;
        Ok(GqlSummaries {
            daily: daily.into(),
            weekly: weekly.into(),
        })
    }
}
