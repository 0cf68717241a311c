//! Phase, project and assignee rollups over classified work items.

use crate::calculations::delay::{DelayResult, DelayStatus};
use crate::config::WorkloadThresholds;
use crate::effort::{EffortTotals, EffortUnitConverter};
use crate::task::WorkItem;
use serde::{Deserialize, Serialize};

pub const NO_PHASE_LABEL: &str = "No phase";

/// Phase bucket a work item belongs to.
///
/// Resolution order: the item's own phase id, its own phase name, the
/// linked task's phase id, the linked task's phase name, then
/// [`PhaseKey::Unphased`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PhaseKey {
    Id(i64),
    Name(String),
    Unphased,
}

fn non_blank(name: Option<&String>) -> Option<&String> {
    name.filter(|n| !n.trim().is_empty())
}

impl PhaseKey {
    /// Resolve the phase key and, when known, the phase display name.
    pub fn resolve(item: &WorkItem) -> (PhaseKey, Option<String>) {
        let own_name = non_blank(item.phase_name.as_ref());
        if let Some(id) = item.phase_id {
            return (PhaseKey::Id(id), own_name.cloned());
        }
        if let Some(name) = own_name {
            return (PhaseKey::Name(name.clone()), Some(name.clone()));
        }

        if let Some(task) = &item.task {
            let task_name = non_blank(task.phase_name.as_ref());
            if let Some(id) = task.phase_id {
                return (PhaseKey::Id(id), task_name.cloned());
            }
            if let Some(name) = task_name {
                return (PhaseKey::Name(name.clone()), Some(name.clone()));
            }
        }
        (PhaseKey::Unphased, None)
    }

    pub fn fallback_name(&self) -> String {
        match self {
            PhaseKey::Id(id) => format!("Phase {id}"),
            PhaseKey::Name(name) => name.clone(),
            PhaseKey::Unphased => NO_PHASE_LABEL.to_string(),
        }
    }
}

/// Direction of a rolled-up delay total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollupStatus {
    OnTime,
    Ahead,
    Delayed,
}

impl RollupStatus {
    pub fn from_total(total_delay_days: i64) -> Self {
        match total_delay_days {
            t if t > 0 => RollupStatus::Delayed,
            t if t < 0 => RollupStatus::Ahead,
            _ => RollupStatus::OnTime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RollupStatus::OnTime => "on-time",
            RollupStatus::Ahead => "ahead",
            RollupStatus::Delayed => "delayed",
        }
    }
}

/// A work item together with its delay classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessedItem {
    pub item: WorkItem,
    pub delay: DelayResult,
}

impl AssessedItem {
    pub fn new(item: WorkItem, delay: DelayResult) -> Self {
        Self { item, delay }
    }

    pub fn signed_delay_days(&self) -> i64 {
        self.delay.signed_days(&self.item)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    /// Unfinished items past their planned end. Completed-late items are
    /// not counted here.
    pub overdue: usize,
    pub warning: usize,
    pub percent: u32,
}

impl ProgressSummary {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a AssessedItem>,
    {
        let mut summary = Self::default();
        for assessed in items {
            summary.total += 1;
            if assessed.item.is_completed() {
                summary.completed += 1;
            }
            match assessed.delay.status {
                DelayStatus::Overdue => summary.overdue += 1,
                DelayStatus::Warning => summary.warning += 1,
                _ => {}
            }
        }
        summary.percent = progress_percent(summary.completed, summary.total);
        summary
    }
}

/// `completed / total` as a whole percentage, 0 for an empty set.
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRollup {
    pub key: PhaseKey,
    pub name: String,
    pub items: Vec<AssessedItem>,
    pub total_delay_days: i64,
    pub delay_status: RollupStatus,
    pub progress: ProgressSummary,
    pub effort: EffortTotals,
}

impl PhaseRollup {
    pub fn build(
        key: PhaseKey,
        name: Option<String>,
        items: Vec<AssessedItem>,
        converter: &EffortUnitConverter,
    ) -> Self {
        let total_delay_days: i64 = items.iter().map(AssessedItem::signed_delay_days).sum();
        let progress = ProgressSummary::from_items(&items);
        let effort = converter.totals(items.iter().map(|a| &a.item));
        let name = name.unwrap_or_else(|| key.fallback_name());
        Self {
            key,
            name,
            items,
            total_delay_days,
            delay_status: RollupStatus::from_total(total_delay_days),
            progress,
            effort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRollup {
    pub project_id: i64,
    pub name: String,
    pub phases: Vec<PhaseRollup>,
    pub total_delay_days: i64,
    pub delay_status: RollupStatus,
    pub progress: ProgressSummary,
    pub effort: EffortTotals,
}

impl ProjectRollup {
    pub fn build(
        project_id: i64,
        name: Option<String>,
        phases: Vec<PhaseRollup>,
        converter: &EffortUnitConverter,
    ) -> Self {
        let total_delay_days: i64 = phases.iter().map(|p| p.total_delay_days).sum();
        let mut project = Self {
            project_id,
            name: name.unwrap_or_else(|| format!("Project {project_id}")),
            phases,
            total_delay_days,
            delay_status: RollupStatus::from_total(total_delay_days),
            progress: ProgressSummary::default(),
            effort: EffortTotals::default(),
        };
        project.progress = ProgressSummary::from_items(project.items());
        project.effort = converter.totals(project.items().map(|a| &a.item));
        project
    }

    /// Every item of the project across all phases.
    pub fn items(&self) -> impl Iterator<Item = &AssessedItem> + '_ {
        self.phases.iter().flat_map(|phase| phase.items.iter())
    }

    pub fn phase(&self, key: &PhaseKey) -> Option<&PhaseRollup> {
        self.phases.iter().find(|phase| &phase.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkloadLevel {
    Low,
    Normal,
    High,
    Overload,
}

impl WorkloadLevel {
    pub fn from_active_count(active: usize, thresholds: &WorkloadThresholds) -> Self {
        if active == 0 {
            WorkloadLevel::Low
        } else if active <= thresholds.normal_max {
            WorkloadLevel::Normal
        } else if active <= thresholds.high_max {
            WorkloadLevel::High
        } else {
            WorkloadLevel::Overload
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadLevel::Low => "LOW",
            WorkloadLevel::Normal => "NORMAL",
            WorkloadLevel::High => "HIGH",
            WorkloadLevel::Overload => "OVERLOAD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssigneeWorkloadReport {
    pub assignee_id: i64,
    pub assignee_name: String,
    pub active_count: usize,
    pub completed_count: usize,
    pub overdue_count: usize,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub estimated_person_days: f64,
    pub actual_person_days: f64,
    /// Actual over estimated hours at full precision.
    pub efficiency: f64,
    pub workload_level: WorkloadLevel,
}

impl AssigneeWorkloadReport {
    pub fn build(
        assignee_id: i64,
        name: Option<String>,
        items: &[&AssessedItem],
        thresholds: &WorkloadThresholds,
        converter: &EffortUnitConverter,
    ) -> Self {
        let active_count = items.iter().filter(|a| a.item.status.is_active()).count();
        let completed_count = items.iter().filter(|a| a.item.is_completed()).count();
        let overdue_count = items
            .iter()
            .filter(|a| a.delay.status == DelayStatus::Overdue)
            .count();
        let effort = converter.totals(items.iter().copied().map(|a| &a.item));

        Self {
            assignee_id,
            assignee_name: name.unwrap_or_else(|| format!("Assignee {assignee_id}")),
            active_count,
            completed_count,
            overdue_count,
            estimated_hours: effort.estimated_hours,
            actual_hours: effort.actual_hours,
            estimated_person_days: effort.estimated_person_days,
            actual_person_days: effort.actual_person_days,
            efficiency: efficiency(effort.actual_hours, effort.estimated_hours),
            workload_level: WorkloadLevel::from_active_count(active_count, thresholds),
        }
    }

    /// Efficiency rounded to two decimals for display.
    pub fn efficiency_display(&self) -> f64 {
        (self.efficiency * 100.0).round() / 100.0
    }
}

/// Actual over estimated hours, 0 when nothing was estimated.
pub fn efficiency(actual_hours: f64, estimated_hours: f64) -> f64 {
    if estimated_hours == 0.0 {
        return 0.0;
    }
    actual_hours / estimated_hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{LinkedTask, WorkStatus};

    #[test]
    fn phase_key_prefers_item_phase_over_task_phase() {
        let mut task = LinkedTask::new(10);
        task.phase_id = Some(2);
        task.phase_name = Some("Build".into());
        let item = WorkItem::new(1, 1, WorkStatus::NotStarted)
            .with_phase(Some(1), Some("Design"))
            .with_task(task);
        assert_eq!(PhaseKey::resolve(&item), (PhaseKey::Id(1), Some("Design".into())));
    }

    #[test]
    fn phase_key_uses_item_name_before_task_id() {
        let mut task = LinkedTask::new(10);
        task.phase_id = Some(2);
        let item = WorkItem::new(1, 1, WorkStatus::NotStarted)
            .with_phase(None, Some("Design"))
            .with_task(task);
        assert_eq!(PhaseKey::resolve(&item).0, PhaseKey::Name("Design".into()));
    }

    #[test]
    fn phase_key_falls_back_to_task_then_unphased() {
        let mut task = LinkedTask::new(10);
        task.phase_name = Some("Test".into());
        let item = WorkItem::new(1, 1, WorkStatus::NotStarted).with_task(task);
        assert_eq!(PhaseKey::resolve(&item).0, PhaseKey::Name("Test".into()));

        let bare = WorkItem::new(2, 1, WorkStatus::NotStarted).with_phase(None, Some("  "));
        assert_eq!(PhaseKey::resolve(&bare), (PhaseKey::Unphased, None));
    }

    #[test]
    fn workload_thresholds_are_inclusive() {
        let t = WorkloadThresholds::default();
        assert_eq!(WorkloadLevel::from_active_count(0, &t), WorkloadLevel::Low);
        assert_eq!(WorkloadLevel::from_active_count(1, &t), WorkloadLevel::Normal);
        assert_eq!(WorkloadLevel::from_active_count(3, &t), WorkloadLevel::Normal);
        assert_eq!(WorkloadLevel::from_active_count(4, &t), WorkloadLevel::High);
        assert_eq!(WorkloadLevel::from_active_count(6, &t), WorkloadLevel::High);
        assert_eq!(WorkloadLevel::from_active_count(7, &t), WorkloadLevel::Overload);
    }

    #[test]
    fn progress_percent_rounds_half_up() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
    }

    #[test]
    fn efficiency_guards_zero_estimate() {
        assert_eq!(efficiency(5.0, 0.0), 0.0);
        assert_eq!(efficiency(15.0, 10.0), 1.5);
    }
}
