use crate::dates;
use crate::error::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    NotStarted,
    InProgress,
    ReviewPending,
    Reviewed,
    Completed,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 5] = [
        WorkStatus::NotStarted,
        WorkStatus::InProgress,
        WorkStatus::ReviewPending,
        WorkStatus::Reviewed,
        WorkStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::NotStarted => "NOT_STARTED",
            WorkStatus::InProgress => "IN_PROGRESS",
            WorkStatus::ReviewPending => "REVIEW_PENDING",
            WorkStatus::Reviewed => "REVIEWED",
            WorkStatus::Completed => "COMPLETED",
        }
    }

    /// Started but not yet completed.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            WorkStatus::InProgress | WorkStatus::ReviewPending | WorkStatus::Reviewed
        )
    }

    pub fn is_completed(&self) -> bool {
        *self == WorkStatus::Completed
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        WorkStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| EngineError::UnknownStatus(s.to_string()))
    }
}

/// The task a work item hangs off in the WBS, used as a fallback source
/// for phase membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedTask {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
}

impl LinkedTask {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// One leaf of the work-breakdown structure, as loaded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: i64,
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<LinkedTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    pub status: WorkStatus,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_end_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "dates::deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
}

impl WorkItem {
    pub fn new(id: i64, project_id: i64, status: WorkStatus) -> Self {
        Self {
            id,
            project_id,
            project_name: None,
            title: None,
            phase_id: None,
            phase_name: None,
            task: None,
            assignee_id: None,
            assignee_name: None,
            status,
            planned_start_date: None,
            planned_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            estimated_hours: 0.0,
            actual_hours: 0.0,
        }
    }

    pub fn with_planned(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.planned_start_date = start;
        self.planned_end_date = end;
        self
    }

    pub fn with_actual(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.actual_start_date = start;
        self.actual_end_date = end;
        self
    }

    pub fn with_hours(mut self, estimated: f64, actual: f64) -> Self {
        self.estimated_hours = estimated;
        self.actual_hours = actual;
        self
    }

    pub fn with_assignee(mut self, id: i64, name: impl Into<String>) -> Self {
        self.assignee_id = Some(id);
        self.assignee_name = Some(name.into());
        self
    }

    pub fn with_phase(mut self, id: Option<i64>, name: Option<&str>) -> Self {
        self.phase_id = id;
        self.phase_name = name.map(ToOwned::to_owned);
        self
    }

    pub fn with_task(mut self, task: LinkedTask) -> Self {
        self.task = Some(task);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}
