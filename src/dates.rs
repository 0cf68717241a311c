//! Day-granularity date helpers shared by every component.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Build a validated calendar date.
pub fn calendar_date(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidMonth { year, month });
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(EngineError::InvalidDate { year, month, day })
}

/// First day of a month, rejecting months outside 1-12.
pub fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    calendar_date(year, month, 1)
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a `YYYY-MM-DD` string. RFC 3339 and naive timestamps are accepted
/// too and truncated to the calendar day they carry, in their own offset.
pub fn parse_date(input: &str) -> EngineResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(normalize(timestamp.naive_local()));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(normalize)
        .ok_or_else(|| EngineError::UnparseableDate {
            input: input.to_string(),
        })
}

/// Serde helper for optional date fields that may arrive as timestamps.
pub(crate) fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// Drop the time-of-day component.
pub fn normalize(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Signed whole days from `from` to `to` (`to - from`).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidMonth { year, month })?;
    Ok(days_between(first, next) as u32)
}

/// Last day of the month containing `date`.
pub(crate) fn last_of_month(date: NaiveDate) -> EngineResult<NaiveDate> {
    let days = days_in_month(date.year(), date.month())?;
    calendar_date(date.year(), date.month(), days)
}

/// Iterate every date from `start` to `end`, both inclusive.
pub(crate) fn each_day(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
