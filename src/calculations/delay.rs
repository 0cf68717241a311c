use crate::clock::Clock;
use crate::dates::days_between;
use crate::task::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WARNING_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelayStatus {
    /// No planned end date to compare against.
    Unknown,
    /// Completed on or before the planned end (or without an actual end).
    OnTime,
    /// Completed after the planned end.
    Delayed,
    /// Not completed and past the planned end.
    Overdue,
    /// Not completed and due within the warning window.
    Warning,
    /// Not completed and comfortably ahead of the planned end.
    OnTrack,
}

impl DelayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelayStatus::Unknown => "unknown",
            DelayStatus::OnTime => "on-time",
            DelayStatus::Delayed => "delayed",
            DelayStatus::Overdue => "overdue",
            DelayStatus::Warning => "warning",
            DelayStatus::OnTrack => "on-track",
        }
    }

    pub fn is_late(&self) -> bool {
        matches!(self, DelayStatus::Delayed | DelayStatus::Overdue)
    }
}

impl fmt::Display for DelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayResult {
    pub status: DelayStatus,
    pub days: u32,
}

impl DelayResult {
    pub fn new(status: DelayStatus, days: i64) -> Self {
        Self {
            status,
            days: days.unsigned_abs() as u32,
        }
    }

    pub fn unknown() -> Self {
        Self::new(DelayStatus::Unknown, 0)
    }

    /// Contribution of this result to a phase delay total: late items add
    /// their days, items completed early subtract theirs.
    pub fn signed_days(&self, item: &WorkItem) -> i64 {
        match self.status {
            DelayStatus::Delayed | DelayStatus::Overdue => i64::from(self.days),
            DelayStatus::OnTime if item.is_completed() && self.days > 0 => -i64::from(self.days),
            _ => 0,
        }
    }
}

/// Classifies a single work item against its planned end date.
///
/// "on-time" covers three cases that callers tell apart by context:
/// finished exactly on the planned day, finished early (`days > 0`), and
/// completed with no recorded actual end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayClassifier {
    warning_window_days: i64,
}

impl Default for DelayClassifier {
    fn default() -> Self {
        Self {
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }
}

impl DelayClassifier {
    /// A negative window is clamped to 0, so only items due today warn.
    pub fn new(warning_window_days: i64) -> Self {
        Self {
            warning_window_days: warning_window_days.max(0),
        }
    }

    pub fn warning_window_days(&self) -> i64 {
        self.warning_window_days
    }

    pub fn classify(&self, item: &WorkItem, today: NaiveDate) -> DelayResult {
        let Some(planned_end) = item.planned_end_date else {
            return DelayResult::unknown();
        };

        if item.is_completed() {
            return match item.actual_end_date {
                Some(actual_end) => {
                    let diff = days_between(planned_end, actual_end);
                    if diff > 0 {
                        DelayResult::new(DelayStatus::Delayed, diff)
                    } else {
                        DelayResult::new(DelayStatus::OnTime, diff)
                    }
                }
                None => DelayResult::new(DelayStatus::OnTime, 0),
            };
        }

        let diff = days_between(planned_end, today);
        if diff > 0 {
            DelayResult::new(DelayStatus::Overdue, diff)
        } else if diff >= -self.warning_window_days {
            DelayResult::new(DelayStatus::Warning, diff)
        } else {
            DelayResult::new(DelayStatus::OnTrack, diff)
        }
    }

    pub fn classify_now<C: Clock>(&self, item: &WorkItem, clock: &C) -> DelayResult {
        self.classify(item, clock.today())
    }
}
