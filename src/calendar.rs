use crate::dates::{self, each_day};
use crate::error::{EngineError, EngineResult};
use crate::holiday::JapaneseHolidayCalendar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Working-day calendar: Monday-Friday minus Japanese public holidays.
///
/// Company-specific closures (year-end shutdown, foundation day) can be
/// layered on top and count as non-business days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDayCalendar {
    #[serde(skip)]
    holidays: JapaneseHolidayCalendar,
    #[serde(default)]
    closures: BTreeSet<NaiveDate>,
}

impl BusinessDayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closures<I>(closures: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            holidays: JapaneseHolidayCalendar,
            closures: closures.into_iter().collect(),
        }
    }

    pub fn holidays(&self) -> &JapaneseHolidayCalendar {
        &self.holidays
    }

    /// Add a single company closure day
    pub fn add_closure(&mut self, date: NaiveDate) {
        self.closures.insert(date);
    }

    /// Add multiple closure days at once
    pub fn add_closures(&mut self, dates: &[NaiveDate]) {
        self.closures.extend(dates);
    }

    pub fn closures(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.closures.iter().copied()
    }

    pub fn is_weekend(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.is_holiday(date)
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        self.holidays.holiday_name(date)
    }

    /// Check if a date is a working day
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !Self::is_weekend(date) && !self.is_holiday(date) && !self.closures.contains(&date)
    }

    /// Count business days in a date range, both ends included
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        each_day(start, end)
            .filter(|date| self.is_business_day(*date))
            .count() as u32
    }

    pub fn business_days_in_month(&self, year: i32, month: u32) -> EngineResult<u32> {
        let first = dates::first_of_month(year, month)?;
        let last = dates::last_of_month(first)?;
        Ok(self.business_days_between(first, last))
    }

    /// Get all business days in a date range
    pub fn business_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        each_day(start, end)
            .filter(|date| self.is_business_day(*date))
            .collect()
    }

    /// Find the next business day strictly after a given date
    pub fn next_business_day(&self, from: NaiveDate) -> EngineResult<NaiveDate> {
        self.add_business_days(from, 1)
    }

    /// Find the date `days` business days after `from`
    pub fn add_business_days(&self, from: NaiveDate, days: u32) -> EngineResult<NaiveDate> {
        let mut current = from;
        let mut count = 0;

        while count < days {
            current = current
                .checked_add_signed(Duration::days(1))
                .ok_or(EngineError::DateOutOfRange { start: from, days })?;
            if self.is_business_day(current) {
                count += 1;
            }
        }
        Ok(current)
    }
}

impl bdays::HolidayCalendar<NaiveDate> for BusinessDayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.is_holiday(date) || self.closures.contains(&date)
    }
}
