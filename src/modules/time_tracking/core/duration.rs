use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("end {end} is before start {start}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("date {date} is outside the supported calendar range")]
    DateOutOfRange { date: NaiveDate },
}

pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, DurationError> {
    if end < start {
        return Err(DurationError::InvalidInterval { start, end });
    }
    Ok((end - start).num_seconds())
}

/// Unrounded; callers round for display only.
pub fn elapsed_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}

/// The calendar day `timestamp` falls on at the given offset. Its `Display`
/// form is the `YYYY-MM-DD` bucket key.
pub fn calendar_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// First instant of `date` at the given offset.
pub fn day_start(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>, DurationError> {
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| utc.and_utc())
        .ok_or(DurationError::DateOutOfRange { date })
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DurationError> {
    date.checked_add_signed(TimeDelta::days(days))
        .ok_or(DurationError::DateOutOfRange { date })
}

/// 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBounds {
    pub start_date: NaiveDate,
    /// Last calendar day inside the week.
    pub end_date: NaiveDate,
    pub start: DateTime<Utc>,
    /// The instant after the last day ends; exclusive.
    pub end: DateTime<Utc>,
}

impl WeekBounds {
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take(7)
    }
}

/// Fails when the week or the instant after it falls outside chrono's range.
pub fn week_bounds(
    anchor: NaiveDate,
    week_start: Weekday,
    offset: FixedOffset,
) -> Result<WeekBounds, DurationError> {
    let back = (7 + anchor.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    let start_date = shift_days(anchor, -i64::from(back))?;
    let next_week = shift_days(start_date, 7)?;
    Ok(WeekBounds {
        start_date,
        end_date: shift_days(start_date, 6)?,
        start: day_start(start_date, offset)?,
        end: day_start(next_week, offset)?,
    })
}

#[cfg(test)]
mod duration_tests {
    use super::*;
    use chrono::{Offset, TimeZone};
    use rstest::rstest;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(utc(9, 0), utc(17, 0), 28_800)]
    #[case(utc(9, 0), utc(9, 0), 0)]
    #[case(utc(12, 0), utc(12, 45), 2_700)]
    fn it_should_count_whole_seconds_between_two_instants(
        #[case] start: DateTime<Utc>,
        #[case] end: DateTime<Utc>,
        #[case] expected: i64,
    ) {
        assert_eq!(elapsed_seconds(start, end), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_an_end_before_the_start() {
        let result = elapsed_seconds(utc(10, 0), utc(9, 0));
        assert_eq!(
            result,
            Err(DurationError::InvalidInterval {
                start: utc(10, 0),
                end: utc(9, 0)
            })
        );
    }

    #[rstest]
    fn it_should_convert_seconds_to_unrounded_hours() {
        let seconds = elapsed_seconds(utc(9, 0), utc(16, 20)).unwrap();
        assert!((elapsed_hours(seconds) - 22_800.0 / 3600.0).abs() < 1e-12);
        assert_eq!(elapsed_hours(1), 1.0 / 3600.0);
    }

    #[rstest]
    fn it_should_bucket_by_the_local_calendar_day() {
        let late_evening = Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap();
        assert_eq!(calendar_date(late_evening, Utc.fix()).to_string(), "2024-03-05");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(calendar_date(late_evening, plus_two).to_string(), "2024-03-06");
    }

    #[rstest]
    fn it_should_find_the_first_instant_of_a_local_day() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            day_start(date(2024, 3, 5), plus_two),
            Ok(Utc.with_ymd_and_hms(2024, 3, 4, 22, 0, 0).unwrap())
        );
    }

    #[rstest]
    #[case(date(2024, 3, 3), date(2024, 3, 3))]
    #[case(date(2024, 3, 5), date(2024, 3, 3))]
    #[case(date(2024, 3, 9), date(2024, 3, 3))]
    #[case(date(2024, 3, 10), date(2024, 3, 10))]
    fn it_should_start_weeks_on_sunday(#[case] anchor: NaiveDate, #[case] expected_start: NaiveDate) {
        let bounds = week_bounds(anchor, Weekday::Sun, Utc.fix()).unwrap();
        assert_eq!(bounds.start_date, expected_start);
        assert_eq!(bounds.end_date, expected_start + TimeDelta::days(6));
        assert_eq!(bounds.end - bounds.start, TimeDelta::days(7));
    }

    #[rstest]
    fn it_should_support_a_monday_week_start() {
        let bounds = week_bounds(date(2024, 3, 3), Weekday::Mon, Utc.fix()).unwrap();
        assert_eq!(bounds.start_date, date(2024, 2, 26));
        assert_eq!(bounds.end_date, date(2024, 3, 3));
    }

    #[rstest]
    fn it_should_include_the_start_and_exclude_the_instant_after_the_end() {
        let bounds = week_bounds(date(2024, 3, 5), Weekday::Sun, Utc.fix()).unwrap();
        assert!(bounds.contains(bounds.start));
        assert!(bounds.contains(bounds.end - TimeDelta::seconds(1)));
        assert!(!bounds.contains(bounds.end));
        assert!(!bounds.contains(bounds.start - TimeDelta::seconds(1)));
        assert_eq!(bounds.days().count(), 7);
        assert_eq!(bounds.days().last(), Some(bounds.end_date));
    }

    #[rstest]
    #[case(NaiveDate::MAX, Weekday::Sun)]
    #[case(NaiveDate::MAX, Weekday::Mon)]
    #[case(NaiveDate::MIN, NaiveDate::MIN.weekday().succ())]
    fn it_should_reject_weeks_at_the_edge_of_the_calendar(
        #[case] anchor: NaiveDate,
        #[case] week_start: Weekday,
    ) {
        let result = week_bounds(anchor, week_start, Utc.fix());
        assert!(matches!(result, Err(DurationError::DateOutOfRange { .. })));
    }

    #[rstest]
    fn it_should_reject_a_day_start_that_leaves_the_calendar() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            day_start(NaiveDate::MIN, plus_two),
            Err(DurationError::DateOutOfRange { date: NaiveDate::MIN })
        );
    }

    #[rstest]
    fn it_should_number_days_from_sunday() {
        assert_eq!(day_of_week(date(2024, 3, 3)), 0);
        assert_eq!(day_of_week(date(2024, 3, 5)), 2);
        assert_eq!(day_of_week(date(2024, 3, 9)), 6);
    }
}
