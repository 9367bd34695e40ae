use chrono::{DateTime, NaiveDate, Utc};

use crate::modules::time_tracking::core::breaks::{Break, deductible_beyond, total_break_minutes};
use crate::modules::time_tracking::core::duration::{DurationError, elapsed_hours, elapsed_seconds};
use crate::modules::time_tracking::core::policy::{AccountingPolicy, DAILY_COMPENSATED_MINUTES};
use crate::modules::time_tracking::core::time_entry::TimeEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkedTime {
    pub gross_hours: f64,
    pub break_minutes: f64,
    /// Portion of the compensation allowance this entry consumed.
    pub compensated_minutes: f64,
    pub deductible_hours: f64,
    pub net_hours: f64,
}

/// Net hours of one entry under the default 30 minute allowance. Open
/// entries run to `now`. Configured policies go through [`worked_time`].
pub fn compute_worked_hours(
    entry: &TimeEntry,
    breaks: &[Break],
    now: DateTime<Utc>,
) -> Result<f64, DurationError> {
    Ok(worked_time(entry, breaks, now, DAILY_COMPENSATED_MINUTES)?.net_hours)
}

pub fn worked_time(
    entry: &TimeEntry,
    breaks: &[Break],
    now: DateTime<Utc>,
    allowance_minutes: f64,
) -> Result<WorkedTime, DurationError> {
    let gross_hours = elapsed_hours(elapsed_seconds(entry.clock_in, entry.end_or(now))?);
    let break_minutes = total_break_minutes(breaks)?;
    let allowance = allowance_minutes.max(0.0);
    let deductible_hours = deductible_beyond(break_minutes, allowance) / 60.0;
    Ok(WorkedTime {
        gross_hours,
        break_minutes,
        compensated_minutes: break_minutes.min(allowance),
        deductible_hours,
        net_hours: (gross_hours - deductible_hours).max(0.0),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursSplit {
    pub regular: f64,
    pub overtime: f64,
}

/// Regular time fills up to `threshold` first; everything past it in the
/// period is overtime, whichever entry contributes it.
pub fn split_regular_overtime(
    hours_worked_so_far: f64,
    additional_hours: f64,
    threshold: f64,
) -> HoursSplit {
    let regular = additional_hours.min(threshold - hours_worked_so_far).max(0.0);
    HoursSplit {
        regular,
        overtime: additional_hours - regular,
    }
}

/// Totals for one `(project, job)` pair within a day.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTotals {
    pub project_id: String,
    pub job_id: String,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub total_hours: f64,
    pub break_minutes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub buckets: Vec<BucketTotals>,
}

impl DayAggregate {
    pub fn regular_hours(&self) -> f64 {
        self.buckets.iter().map(|b| b.regular_hours).sum()
    }

    pub fn overtime_hours(&self) -> f64 {
        self.buckets.iter().map(|b| b.overtime_hours).sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.buckets.iter().map(|b| b.total_hours).sum()
    }
}

/// Worked time of each closed entry whose `clock_in` falls on `date`, in
/// clock-in order. Each entry draws on what earlier entries left of the
/// daily break allowance.
pub fn day_worked_times<'a>(
    date: NaiveDate,
    entries: &'a [(TimeEntry, Vec<Break>)],
    policy: &AccountingPolicy,
) -> Result<Vec<(&'a TimeEntry, WorkedTime)>, DurationError> {
    let mut day: Vec<&(TimeEntry, Vec<Break>)> = entries
        .iter()
        .filter(|(entry, _)| entry.is_complete)
        .filter(|(entry, _)| policy.calendar_date(entry.clock_in) == date)
        .collect();
    day.sort_by_key(|(entry, _)| entry.clock_in);

    let mut allowance = policy.compensated_break_minutes;
    let mut worked = Vec::with_capacity(day.len());
    for (entry, breaks) in day {
        let Some(clock_out) = entry.clock_out else {
            continue;
        };
        let time = worked_time(entry, breaks, clock_out, allowance)?;
        allowance -= time.compensated_minutes;
        worked.push((entry, time));
    }
    Ok(worked)
}

/// Allowance still available after `worked` has drawn on it.
pub fn remaining_allowance(worked: &[(&TimeEntry, WorkedTime)], policy: &AccountingPolicy) -> f64 {
    let used: f64 = worked.iter().map(|(_, time)| time.compensated_minutes).sum();
    (policy.compensated_break_minutes - used).max(0.0)
}

/// Aggregates the closed entries whose `clock_in` falls on `date`.
///
/// Entries are walked as in [`day_worked_times`], then each one draws on
/// what is left of the daily regular threshold. Entries crossing midnight
/// count in full towards their clock-in day. Open entries contribute
/// nothing.
pub fn aggregate_day(
    date: NaiveDate,
    entries: &[(TimeEntry, Vec<Break>)],
    policy: &AccountingPolicy,
) -> Result<DayAggregate, DurationError> {
    let mut worked_so_far = 0.0;
    let mut buckets: Vec<BucketTotals> = Vec::new();

    for (entry, worked) in day_worked_times(date, entries, policy)? {
        let split =
            split_regular_overtime(worked_so_far, worked.net_hours, policy.daily_regular_hours);
        worked_so_far += worked.net_hours;

        let position = buckets
            .iter()
            .position(|b| b.project_id == entry.project_id && b.job_id == entry.job_id);
        let bucket = match position {
            Some(index) => &mut buckets[index],
            None => {
                buckets.push(BucketTotals {
                    project_id: entry.project_id.clone(),
                    job_id: entry.job_id.clone(),
                    regular_hours: 0.0,
                    overtime_hours: 0.0,
                    total_hours: 0.0,
                    break_minutes: 0.0,
                });
                let last = buckets.len() - 1;
                &mut buckets[last]
            }
        };
        bucket.regular_hours += split.regular;
        bucket.overtime_hours += split.overtime;
        bucket.total_hours += worked.net_hours;
        bucket.break_minutes += worked.break_minutes;
    }

    Ok(DayAggregate { date, buckets })
}
