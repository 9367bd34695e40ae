use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::modules::time_tracking::core::duration::{WeekBounds, day_of_week};
use crate::modules::time_tracking::core::hours::BucketTotals;

/// Identifies one cached daily row; upserts match on all four parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryKey {
    pub user_id: String,
    pub date: NaiveDate,
    pub project_id: Option<String>,
    pub job_id: Option<String>,
}

/// Cached hours for one user and day, optionally narrowed to a project/job.
/// `break_time` is in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub user_id: String,
    pub date: NaiveDate,
    pub day_of_week: u32,
    pub project_id: Option<String>,
    pub job_id: Option<String>,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
}

impl DailySummary {
    pub fn new(
        user_id: impl Into<String>,
        date: NaiveDate,
        project_id: Option<String>,
        job_id: Option<String>,
        regular_hours: f64,
        overtime_hours: f64,
        total_hours: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            day_of_week: day_of_week(date),
            project_id,
            job_id,
            regular_hours,
            overtime_hours,
            total_hours,
            break_time: 0.0,
        }
    }

    pub fn from_bucket(user_id: &str, date: NaiveDate, bucket: &BucketTotals) -> Self {
        Self::new(
            user_id,
            date,
            Some(bucket.project_id.clone()),
            Some(bucket.job_id.clone()),
            bucket.regular_hours,
            bucket.overtime_hours,
            bucket.total_hours,
        )
        .with_break_time(bucket.break_minutes)
    }

    pub fn with_break_time(mut self, minutes: f64) -> Self {
        self.break_time = minutes;
        self
    }

    pub fn key(&self) -> SummaryKey {
        SummaryKey {
            user_id: self.user_id.clone(),
            date: self.date,
            project_id: self.project_id.clone(),
            job_id: self.job_id.clone(),
        }
    }
}

/// All of a user's rows for one day, summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub user_id: String,
    pub date: NaiveDate,
    pub day_of_week: u32,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
    pub rows: Vec<DailySummary>,
}

impl DayTotals {
    pub fn from_rows(user_id: &str, date: NaiveDate, rows: Vec<DailySummary>) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
            day_of_week: day_of_week(date),
            regular_hours: rows.iter().map(|r| r.regular_hours).sum(),
            overtime_hours: rows.iter().map(|r| r.overtime_hours).sum(),
            total_hours: rows.iter().map(|r| r.total_hours).sum(),
            break_time: rows.iter().map(|r| r.break_time).sum(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
    /// Set by an approver outside this service; never reset here.
    pub is_approved: bool,
}

impl WeeklyReport {
    /// Sums the daily rows that fall inside `bounds`.
    pub fn from_daily(user_id: &str, bounds: &WeekBounds, rows: &[DailySummary]) -> Self {
        let in_week: Vec<&DailySummary> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| r.date >= bounds.start_date && r.date <= bounds.end_date)
            .collect();
        Self {
            user_id: user_id.to_string(),
            week_start_date: bounds.start_date,
            week_end_date: bounds.end_date,
            regular_hours: in_week.iter().map(|r| r.regular_hours).sum(),
            overtime_hours: in_week.iter().map(|r| r.overtime_hours).sum(),
            total_hours: in_week.iter().map(|r| r.total_hours).sum(),
            break_time: in_week.iter().map(|r| r.break_time).sum(),
            is_approved: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub report: WeeklyReport,
    pub days: Vec<DayTotals>,
}

/// Hours booked against one project over a week. Rows without a project
/// are grouped under `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHours {
    pub project_id: Option<String>,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_time: f64,
}

impl ProjectHours {
    fn empty(project_id: Option<String>) -> Self {
        Self {
            project_id,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            total_hours: 0.0,
            break_time: 0.0,
        }
    }

    /// One entry per project found in `rows`, ordered by project id.
    pub fn by_project(rows: &[DailySummary]) -> Vec<Self> {
        let mut projects: BTreeMap<Option<String>, Self> = BTreeMap::new();
        for row in rows {
            let hours = projects
                .entry(row.project_id.clone())
                .or_insert_with(|| Self::empty(row.project_id.clone()));
            hours.regular_hours += row.regular_hours;
            hours.overtime_hours += row.overtime_hours;
            hours.total_hours += row.total_hours;
            hours.break_time += row.break_time;
        }
        projects.into_values().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDistribution {
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub projects: Vec<ProjectHours>,
}
