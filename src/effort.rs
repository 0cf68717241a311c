//! Effort unit conversion.
//!
//! Two baselines live side by side and are deliberately kept apart:
//! person-months divide by a fixed 20 business days, while the expected
//! hours for a specific month use that month's real business-day count.

use crate::calendar::BusinessDayCalendar;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::task::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: f64 = 7.5;
pub const BUSINESS_DAYS_PER_MONTH_BASELINE: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct EffortUnitConverter {
    calendar: BusinessDayCalendar,
    hours_per_day: f64,
    person_month_days: f64,
}

impl Default for EffortUnitConverter {
    fn default() -> Self {
        Self::new(BusinessDayCalendar::default())
    }
}

impl EffortUnitConverter {
    pub fn new(calendar: BusinessDayCalendar) -> Self {
        Self {
            calendar,
            hours_per_day: HOURS_PER_DAY,
            person_month_days: BUSINESS_DAYS_PER_MONTH_BASELINE,
        }
    }

    /// Fails with `InvalidConfig` when a divisor is zero, negative or not finite.
    pub fn with_config(calendar: BusinessDayCalendar, config: &EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            calendar,
            hours_per_day: config.hours_per_day,
            person_month_days: config.person_month_days,
        })
    }

    pub fn calendar(&self) -> &BusinessDayCalendar {
        &self.calendar
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn hours_to_person_days(&self, hours: f64) -> f64 {
        hours / self.hours_per_day
    }

    pub fn person_days_to_hours(&self, person_days: f64) -> f64 {
        person_days * self.hours_per_day
    }

    pub fn hours_to_person_months(&self, hours: f64) -> f64 {
        self.hours_to_person_days(hours) / self.person_month_days
    }

    /// Hours one person is expected to book in a calendar month.
    pub fn expected_hours_for_month(&self, year: i32, month: u32) -> EngineResult<f64> {
        let days = self.calendar.business_days_in_month(year, month)?;
        Ok(f64::from(days) * self.hours_per_day)
    }

    pub fn expected_hours_between(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        f64::from(self.calendar.business_days_between(start, end)) * self.hours_per_day
    }

    /// Booked hours as a percentage of the month's expected hours.
    pub fn monthly_progress(&self, actual_hours: f64, year: i32, month: u32) -> EngineResult<f64> {
        let expected = self.expected_hours_for_month(year, month)?;
        if expected == 0.0 {
            return Ok(0.0);
        }
        Ok(actual_hours / expected * 100.0)
    }

    pub fn totals<'a, I>(&self, items: I) -> EffortTotals
    where
        I: IntoIterator<Item = &'a WorkItem>,
    {
        let (estimated_hours, actual_hours) = items
            .into_iter()
            .fold((0.0, 0.0), |(est, act), item| {
                (est + item.estimated_hours, act + item.actual_hours)
            });
        EffortTotals {
            estimated_hours,
            actual_hours,
            estimated_person_days: self.hours_to_person_days(estimated_hours),
            actual_person_days: self.hours_to_person_days(actual_hours),
            estimated_person_months: self.hours_to_person_months(estimated_hours),
            actual_person_months: self.hours_to_person_months(actual_hours),
        }
    }
}

/// Summed effort of a group of work items in every unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffortTotals {
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub estimated_person_days: f64,
    pub actual_person_days: f64,
    pub estimated_person_months: f64,
    pub actual_person_months: f64,
}
