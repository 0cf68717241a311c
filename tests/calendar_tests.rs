use bdays::HolidayCalendar;
use chrono::{Datelike, NaiveDate, Weekday};
use wbs_calendar::dates::days_in_month;
use wbs_calendar::{BusinessDayCalendar, EngineError};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn weekends_are_not_business_days() {
    let cal = BusinessDayCalendar::new();
    // 2024-03-09 is a Saturday, 2024-03-10 is a Sunday
    assert!(!cal.is_business_day(d(2024, 3, 9)));
    assert!(!cal.is_business_day(d(2024, 3, 10)));
    assert!(cal.is_business_day(d(2024, 3, 11)));
}

#[test]
fn holidays_and_substitutes_are_not_business_days() {
    let cal = BusinessDayCalendar::new();
    assert!(!cal.is_business_day(d(2024, 3, 20)));
    assert!(!cal.is_business_day(d(2024, 9, 23)));
    assert!(!cal.is_business_day(d(2009, 9, 22)));
}

#[test]
fn business_days_in_month_2024() {
    let cal = BusinessDayCalendar::new();
    assert_eq!(cal.business_days_in_month(2024, 1).unwrap(), 21);
    assert_eq!(cal.business_days_in_month(2024, 2).unwrap(), 19);
    assert_eq!(cal.business_days_in_month(2024, 3).unwrap(), 20);
    assert_eq!(cal.business_days_in_month(2024, 9).unwrap(), 19);
}

#[test]
fn business_days_in_month_never_exceeds_month_length() {
    let cal = BusinessDayCalendar::new();
    for year in [1850, 1900, 1999, 2024, 2100, 2151] {
        for month in 1..=12 {
            let business = cal.business_days_in_month(year, month).unwrap();
            assert!(business <= days_in_month(year, month).unwrap());
        }
    }
}

#[test]
fn business_day_implies_weekday_and_not_holiday() {
    let cal = BusinessDayCalendar::new();
    for date in d(2024, 1, 1).iter_days().take(366 * 2) {
        if cal.is_business_day(date) {
            assert!(!matches!(date.weekday(), Weekday::Sat | Weekday::Sun));
            assert!(!cal.is_holiday(date));
        }
    }
}

#[test]
fn business_days_in_invalid_month_is_an_error() {
    let cal = BusinessDayCalendar::new();
    let err = cal.business_days_in_month(2024, 13).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMonth { year: 2024, month: 13 }));
}

#[test]
fn business_days_between_is_inclusive() {
    let cal = BusinessDayCalendar::new();
    assert_eq!(cal.business_days_between(d(2024, 3, 1), d(2024, 3, 15)), 11);
    assert_eq!(cal.business_days_between(d(2024, 3, 11), d(2024, 3, 11)), 1);
    assert_eq!(cal.business_days_between(d(2024, 3, 15), d(2024, 3, 1)), 0);
}

#[test]
fn business_days_in_range_and_count_match() {
    let cal = BusinessDayCalendar::new();
    let start = d(2024, 9, 16);
    let end = d(2024, 9, 27);
    let days = cal.business_days_in_range(start, end);
    assert_eq!(days.len() as u32, cal.business_days_between(start, end));
    // 09-16 and 09-23 are holidays
    assert_eq!(days.first().copied(), Some(d(2024, 9, 17)));
    assert_eq!(days.len(), 8);
}

#[test]
fn next_business_day_skips_weekend_and_substitute_holiday() {
    let cal = BusinessDayCalendar::new();
    // Friday 2024-09-20, then weekend, then 振替休日 on Monday
    let next = cal.next_business_day(d(2024, 9, 20)).unwrap();
    assert_eq!(next, d(2024, 9, 24));
}

#[test]
fn add_business_days_counts_only_workdays() {
    let cal = BusinessDayCalendar::new();
    let monday = d(2024, 3, 11);
    let four_ahead = cal.add_business_days(monday, 4).unwrap();
    assert_eq!(four_ahead.weekday(), Weekday::Fri);
    // Crossing 春分の日 on Wednesday 03-20
    assert_eq!(cal.add_business_days(d(2024, 3, 18), 2).unwrap(), d(2024, 3, 21));
}

#[test]
fn closures_block_business_days() {
    let mut cal = BusinessDayCalendar::new();
    let closure = d(2024, 12, 27);
    assert!(cal.is_business_day(closure));
    cal.add_closure(closure);
    assert!(!cal.is_business_day(closure));

    cal.add_closures(&[d(2024, 12, 30), d(2024, 12, 31)]);
    assert_eq!(cal.closures().count(), 3);
    assert_eq!(cal.business_days_between(d(2024, 12, 23), d(2024, 12, 31)), 4);
}

#[test]
fn bdays_interop_agrees_with_business_day_rule() {
    let cal = BusinessDayCalendar::with_closures([d(2024, 12, 30)]);
    for date in d(2024, 1, 1).iter_days().take(366) {
        assert_eq!(HolidayCalendar::is_bday(&cal, date), cal.is_business_day(date), "{date}");
    }
}
