// Shared test fixtures. Every timestamp lives on Tuesday 2024-03-05 (UTC)
// unless a test says otherwise; its Sunday-start week is 03-03..03-09.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub mod builders;
pub mod clock;
pub mod commands;
pub mod state;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    on(day(), hour, minute)
}

pub fn on(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
}
