//! Japanese public holidays.
//!
//! Three kinds of holiday come straight from the date itself: fixed
//! month/day holidays, "nth Monday" holidays and the two equinox days.
//! Two more are derived from neighbouring dates:
//!
//! * 振替休日: a Monday whose preceding Sunday is a holiday.
//! * 国民の休日: a weekday sandwiched between two holidays.
//!
//! Neighbours are evaluated at most one level deep, so the rules never
//! feed back into each other.

use crate::dates::{self, each_day};
use crate::error::EngineResult;
use chrono::{Datelike, NaiveDate, Weekday};

pub const SUBSTITUTE_HOLIDAY: &str = "振替休日";
pub const NATIONAL_HOLIDAY: &str = "国民の休日";
pub const VERNAL_EQUINOX_DAY: &str = "春分の日";
pub const AUTUMNAL_EQUINOX_DAY: &str = "秋分の日";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHoliday {
    pub month: u32,
    pub day: u32,
    pub name: &'static str,
}

/// A holiday on the nth Monday of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MondayHoliday {
    pub month: u32,
    pub week_of_month: u32,
    pub name: &'static str,
}

pub static FIXED_HOLIDAYS: [FixedHoliday; 10] = [
    FixedHoliday { month: 1, day: 1, name: "元日" },
    FixedHoliday { month: 2, day: 11, name: "建国記念の日" },
    FixedHoliday { month: 2, day: 23, name: "天皇誕生日" },
    FixedHoliday { month: 4, day: 29, name: "昭和の日" },
    FixedHoliday { month: 5, day: 3, name: "憲法記念日" },
    FixedHoliday { month: 5, day: 4, name: "みどりの日" },
    FixedHoliday { month: 5, day: 5, name: "こどもの日" },
    FixedHoliday { month: 8, day: 11, name: "山の日" },
    FixedHoliday { month: 11, day: 3, name: "文化の日" },
    FixedHoliday { month: 11, day: 23, name: "勤労感謝の日" },
];

pub static MONDAY_HOLIDAYS: [MondayHoliday; 4] = [
    MondayHoliday { month: 1, week_of_month: 2, name: "成人の日" },
    MondayHoliday { month: 7, week_of_month: 3, name: "海の日" },
    MondayHoliday { month: 9, week_of_month: 3, name: "敬老の日" },
    MondayHoliday { month: 10, week_of_month: 2, name: "スポーツの日" },
];

/// Year range and base constant for one segment of the equinox fit.
struct EquinoxSegment {
    first_year: i32,
    last_year: i32,
    base: f64,
}

const EQUINOX_COEFFICIENT: f64 = 0.242194;
const EQUINOX_ANCHOR_YEAR: i32 = 1980;
const DEFAULT_VERNAL_DAY: u32 = 20;
const DEFAULT_AUTUMNAL_DAY: u32 = 23;

static VERNAL_SEGMENTS: [EquinoxSegment; 4] = [
    EquinoxSegment { first_year: 1851, last_year: 1899, base: 19.8277 },
    EquinoxSegment { first_year: 1900, last_year: 1979, base: 20.8357 },
    EquinoxSegment { first_year: 1980, last_year: 2099, base: 20.8431 },
    EquinoxSegment { first_year: 2100, last_year: 2150, base: 21.8510 },
];

static AUTUMNAL_SEGMENTS: [EquinoxSegment; 4] = [
    EquinoxSegment { first_year: 1851, last_year: 1899, base: 22.2588 },
    EquinoxSegment { first_year: 1900, last_year: 1979, base: 23.2588 },
    EquinoxSegment { first_year: 1980, last_year: 2099, base: 23.2488 },
    EquinoxSegment { first_year: 2100, last_year: 2150, base: 24.2488 },
];

fn equinox_day(year: i32, segments: &[EquinoxSegment], fallback: u32) -> u32 {
    let Some(segment) = segments
        .iter()
        .find(|s| (s.first_year..=s.last_year).contains(&year))
    else {
        tracing::trace!(year, fallback, "equinox year outside approximation range");
        return fallback;
    };
    let offset = f64::from(year - EQUINOX_ANCHOR_YEAR);
    (segment.base + EQUINOX_COEFFICIENT * offset - (offset / 4.0).floor()).floor() as u32
}

/// Day of March on which 春分の日 falls.
pub fn vernal_equinox_day(year: i32) -> u32 {
    equinox_day(year, &VERNAL_SEGMENTS, DEFAULT_VERNAL_DAY)
}

/// Day of September on which 秋分の日 falls.
pub fn autumnal_equinox_day(year: i32) -> u32 {
    equinox_day(year, &AUTUMNAL_SEGMENTS, DEFAULT_AUTUMNAL_DAY)
}

/// Day of month of the nth Monday. `n` is 1-based.
pub fn nth_monday(year: i32, month: u32, n: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_weekday = first.weekday().num_days_from_sunday();
    Some(1 + (8 - first_weekday) % 7 + (n - 1) * 7)
}

/// The Japanese civil holiday calendar.
///
/// Zero-sized: the holiday tables are process-wide statics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JapaneseHolidayCalendar;

impl JapaneseHolidayCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }

    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        self.resolve(date, true)
    }

    /// Fixed, nth-Monday and equinox holidays only.
    pub fn named_holiday(&self, date: NaiveDate) -> Option<&'static str> {
        let (year, month, day) = (date.year(), date.month(), date.day());

        if let Some(fixed) = FIXED_HOLIDAYS
            .iter()
            .find(|h| h.month == month && h.day == day)
        {
            return Some(fixed.name);
        }

        if let Some(monday) = MONDAY_HOLIDAYS.iter().find(|h| {
            h.month == month && nth_monday(year, month, h.week_of_month) == Some(day)
        }) {
            return Some(monday.name);
        }

        if month == 3 && day == vernal_equinox_day(year) {
            return Some(VERNAL_EQUINOX_DAY);
        }
        if month == 9 && day == autumnal_equinox_day(year) {
            return Some(AUTUMNAL_EQUINOX_DAY);
        }
        None
    }

    // `allow_national` is false when evaluating a neighbour for the
    // national-holiday rule, which bounds the recursion at one level.
    fn resolve(&self, date: NaiveDate, allow_national: bool) -> Option<&'static str> {
        if let Some(name) = self.named_holiday(date) {
            return Some(name);
        }

        let weekday = date.weekday();
        if weekday == Weekday::Mon {
            let sunday = date.pred_opt()?;
            if self.resolve(sunday, false).is_some() {
                return Some(SUBSTITUTE_HOLIDAY);
            }
        }

        if allow_national && !matches!(weekday, Weekday::Sat | Weekday::Sun) {
            let before = date.pred_opt()?;
            let after = date.succ_opt()?;
            if self.resolve(before, false).is_some() && self.resolve(after, false).is_some() {
                return Some(NATIONAL_HOLIDAY);
            }
        }
        None
    }

    /// Every holiday in `[start, end]`, in date order.
    pub fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, &'static str)> {
        each_day(start, end)
            .filter_map(|date| self.holiday_name(date).map(|name| (date, name)))
            .collect()
    }

    pub fn holidays_in_month(&self, year: i32, month: u32) -> EngineResult<Vec<(NaiveDate, &'static str)>> {
        let first = dates::first_of_month(year, month)?;
        let last = dates::last_of_month(first)?;
        Ok(self.holidays_between(first, last))
    }

    pub fn holidays_in_year(&self, year: i32) -> EngineResult<Vec<(NaiveDate, &'static str)>> {
        let first = dates::calendar_date(year, 1, 1)?;
        let last = dates::calendar_date(year, 12, 31)?;
        Ok(self.holidays_between(first, last))
    }
}

/// Convenience wrapper over [`JapaneseHolidayCalendar::is_holiday`].
pub fn is_holiday(date: NaiveDate) -> bool {
    JapaneseHolidayCalendar.is_holiday(date)
}

/// Convenience wrapper over [`JapaneseHolidayCalendar::holiday_name`].
pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    JapaneseHolidayCalendar.holiday_name(date)
}
