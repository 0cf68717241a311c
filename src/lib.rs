pub mod calculations;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod dates;
pub mod effort;
pub mod error;
pub mod grid;
pub mod holiday;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;

pub use calculations::delay::{DelayClassifier, DelayResult, DelayStatus};
pub use calculations::rollup::{
    AssessedItem, AssigneeWorkloadReport, PhaseKey, PhaseRollup, ProgressSummary, ProjectRollup,
    RollupStatus, WorkloadLevel,
};
pub use calendar::BusinessDayCalendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, WorkloadThresholds};
pub use effort::{
    BUSINESS_DAYS_PER_MONTH_BASELINE, EffortTotals, EffortUnitConverter, HOURS_PER_DAY,
};
pub use error::{EngineError, EngineResult};
pub use grid::{CalendarGridBuilder, GridCell, is_item_active_on_date, items_active_on};
pub use holiday::JapaneseHolidayCalendar;
pub use schedule::{ScheduleAggregator, ScheduleReport};
pub use task::{LinkedTask, WorkItem, WorkStatus};
