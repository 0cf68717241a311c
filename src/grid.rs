use crate::calendar::BusinessDayCalendar;
use crate::dates;
use crate::error::{EngineError, EngineResult};
use crate::task::WorkItem;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Cells in a month view: six full weeks.
pub const GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_target_month: bool,
    pub is_weekend: bool,
    pub is_business_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<&'static str>,
}

/// Builds month-view grids. Holiday annotations are for display only.
#[derive(Debug, Clone, Default)]
pub struct CalendarGridBuilder {
    calendar: BusinessDayCalendar,
}

impl CalendarGridBuilder {
    pub fn new(calendar: BusinessDayCalendar) -> Self {
        Self { calendar }
    }

    /// 42 cells starting on the Sunday on or before the 1st of the month.
    pub fn build_month_grid(&self, year: i32, month: u32) -> EngineResult<Vec<GridCell>> {
        let first = dates::first_of_month(year, month)?;
        let lead = i64::from(first.weekday().num_days_from_sunday());
        let start = first
            .checked_sub_signed(Duration::days(lead))
            .ok_or(EngineError::InvalidMonth { year, month })?;

        let cells = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| GridCell {
                date,
                in_target_month: date.year() == year && date.month() == month,
                is_weekend: BusinessDayCalendar::is_weekend(date),
                is_business_day: self.calendar.is_business_day(date),
                holiday_name: self.calendar.holiday_name(date),
            })
            .collect::<Vec<_>>();

        if cells.len() != GRID_CELLS {
            return Err(EngineError::InvalidMonth { year, month });
        }
        Ok(cells)
    }

    /// The grid split into six rows of seven, Sunday first.
    pub fn grid_weeks(&self, year: i32, month: u32) -> EngineResult<Vec<Vec<GridCell>>> {
        let cells = self.build_month_grid(year, month)?;
        Ok(cells.chunks(DAYS_PER_WEEK).map(<[GridCell]>::to_vec).collect())
    }
}

/// True when the item's planned span covers `date`, both ends included.
pub fn is_item_active_on_date(item: &WorkItem, date: NaiveDate) -> bool {
    match (item.planned_start_date, item.planned_end_date) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

pub fn items_active_on<'a>(items: &'a [WorkItem], date: NaiveDate) -> Vec<&'a WorkItem> {
    items
        .iter()
        .filter(|item| is_item_active_on_date(item, date))
        .collect()
}
