use std::net::SocketAddr;
use std::str::FromStr;

use chrono::{FixedOffset, Weekday};
use thiserror::Error;

use crate::modules::time_tracking::core::policy::AccountingPolicy;

pub const BIND_ADDR: &str = "TIME_TRACKING_BIND_ADDR";
pub const DAILY_REGULAR_HOURS: &str = "TIME_TRACKING_DAILY_REGULAR_HOURS";
pub const COMPENSATED_BREAK_MINUTES: &str = "TIME_TRACKING_COMPENSATED_BREAK_MINUTES";
pub const UTC_OFFSET_MINUTES: &str = "TIME_TRACKING_UTC_OFFSET_MINUTES";
pub const WEEK_START: &str = "TIME_TRACKING_WEEK_START";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub policy: AccountingPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset variables fall back to the policy defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AccountingPolicy::default();

        let bind_addr = match lookup(BIND_ADDR) {
            Some(raw) => parse(BIND_ADDR, &raw)?,
            None => parse(BIND_ADDR, DEFAULT_BIND_ADDR)?,
        };

        let daily_regular_hours = match lookup(DAILY_REGULAR_HOURS) {
            Some(raw) => parse_non_negative(DAILY_REGULAR_HOURS, &raw)?,
            None => defaults.daily_regular_hours,
        };

        let compensated_break_minutes = match lookup(COMPENSATED_BREAK_MINUTES) {
            Some(raw) => parse_non_negative(COMPENSATED_BREAK_MINUTES, &raw)?,
            None => defaults.compensated_break_minutes,
        };

        let utc_offset = match lookup(UTC_OFFSET_MINUTES) {
            Some(raw) => {
                let minutes: i32 = parse(UTC_OFFSET_MINUTES, &raw)?;
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| invalid(UTC_OFFSET_MINUTES, &raw))?
            }
            None => defaults.utc_offset,
        };

        let week_start = match lookup(WEEK_START) {
            Some(raw) => Weekday::from_str(raw.trim()).map_err(|_| invalid(WEEK_START, &raw))?,
            None => defaults.week_start,
        };

        Ok(Self {
            bind_addr,
            policy: AccountingPolicy {
                daily_regular_hours,
                compensated_break_minutes,
                utc_offset,
                week_start,
            },
        })
    }
}

fn invalid(name: &'static str, raw: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: raw.to_string(),
    }
}

fn parse<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(name, raw))
}

fn parse_non_negative(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = parse(name, raw)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, raw))
    }
}
