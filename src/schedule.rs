use crate::calculations::delay::DelayClassifier;
use crate::calculations::rollup::{
    AssessedItem, AssigneeWorkloadReport, PhaseKey, PhaseRollup, ProjectRollup, RollupStatus,
    WorkloadLevel,
};
use crate::calendar::BusinessDayCalendar;
use crate::clock::{Clock, SystemClock};
use crate::config::{EngineConfig, WorkloadThresholds};
use crate::effort::EffortUnitConverter;
use crate::error::{EngineError, EngineResult};
use crate::task::WorkItem;
use crate::task_validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub as_of: NaiveDate,
    pub projects: Vec<ProjectRollup>,
    pub assignees: Vec<AssigneeWorkloadReport>,
}

impl ScheduleReport {
    pub fn project(&self, project_id: i64) -> Option<&ProjectRollup> {
        self.projects.iter().find(|p| p.project_id == project_id)
    }

    pub fn assignee(&self, assignee_id: i64) -> Option<&AssigneeWorkloadReport> {
        self.assignees.iter().find(|a| a.assignee_id == assignee_id)
    }

    pub fn item_count(&self) -> usize {
        self.projects.iter().map(|p| p.progress.total).sum()
    }

    pub fn summary_line(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("as_of={}", self.as_of));
        parts.push(format!("projects={}", self.projects.len()));
        parts.push(format!("items={}", self.item_count()));

        let delayed = self
            .projects
            .iter()
            .filter(|p| p.delay_status == RollupStatus::Delayed)
            .count();
        if delayed > 0 {
            parts.push(format!("delayed_projects={}", delayed));
        }
        let overdue: usize = self.projects.iter().map(|p| p.progress.overdue).sum();
        if overdue > 0 {
            parts.push(format!("overdue={}", overdue));
        }
        let overloaded = self
            .assignees
            .iter()
            .filter(|a| a.workload_level == WorkloadLevel::Overload)
            .map(|a| a.assignee_name.as_str())
            .collect::<Vec<_>>();
        if !overloaded.is_empty() {
            parts.push(format!("overload={}", overloaded.join("|")));
        }
        parts.join(", ")
    }
}

#[derive(Default)]
struct PhaseBucket {
    name: Option<String>,
    items: Vec<AssessedItem>,
}

#[derive(Default)]
struct ProjectBucket {
    name: Option<String>,
    phases: BTreeMap<PhaseKey, PhaseBucket>,
}

/// Groups classified work items into project/phase rollups and
/// per-assignee workload reports.
pub struct ScheduleAggregator<C: Clock = SystemClock> {
    classifier: DelayClassifier,
    converter: EffortUnitConverter,
    thresholds: WorkloadThresholds,
    clock: C,
}

impl Default for ScheduleAggregator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleAggregator<SystemClock> {
    pub fn new() -> Self {
        Self {
            classifier: DelayClassifier::default(),
            converter: EffortUnitConverter::default(),
            thresholds: WorkloadThresholds::default(),
            clock: SystemClock,
        }
    }

    pub fn with_config(config: &EngineConfig, calendar: BusinessDayCalendar) -> EngineResult<Self> {
        let converter = EffortUnitConverter::with_config(calendar, config)?;
        Ok(Self {
            classifier: DelayClassifier::new(config.warning_window_days),
            converter,
            thresholds: config.workload,
            clock: SystemClock,
        })
    }
}

impl<C: Clock> ScheduleAggregator<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> ScheduleAggregator<D> {
        ScheduleAggregator {
            classifier: self.classifier,
            converter: self.converter,
            thresholds: self.thresholds,
            clock,
        }
    }

    pub fn classifier(&self) -> &DelayClassifier {
        &self.classifier
    }

    pub fn converter(&self) -> &EffortUnitConverter {
        &self.converter
    }

    /// Aggregate as of the injected clock's current date.
    pub fn aggregate(&self, items: &[WorkItem]) -> EngineResult<ScheduleReport> {
        self.aggregate_at(items, self.clock.today())
    }

    /// Aggregate as of `today`. Fails the whole call if any item is
    /// structurally invalid.
    pub fn aggregate_at(&self, items: &[WorkItem], today: NaiveDate) -> EngineResult<ScheduleReport> {
        task_validation::validate_work_items(items).map_err(|err| {
            tracing::warn!(error = %err, "rejecting work item batch");
            EngineError::from(err)
        })?;

        let assessed: Vec<AssessedItem> = items
            .iter()
            .map(|item| AssessedItem::new(item.clone(), self.classifier.classify(item, today)))
            .collect();

        let assignee_reports = self.assignee_reports(&assessed);

        let mut projects: BTreeMap<i64, ProjectBucket> = BTreeMap::new();
        for entry in assessed {
            let (key, phase_name) = PhaseKey::resolve(&entry.item);
            let project = projects.entry(entry.item.project_id).or_default();
            if project.name.is_none() {
                project.name = entry.item.project_name.clone();
            }
            let phase = project.phases.entry(key).or_default();
            if phase.name.is_none() {
                phase.name = phase_name;
            }
            phase.items.push(entry);
        }

        let project_rollups: Vec<ProjectRollup> = projects
            .into_iter()
            .map(|(project_id, bucket)| {
                let phases = bucket
                    .phases
                    .into_iter()
                    .map(|(key, phase)| {
                        PhaseRollup::build(key, phase.name, phase.items, &self.converter)
                    })
                    .collect();
                ProjectRollup::build(project_id, bucket.name, phases, &self.converter)
            })
            .collect();

        tracing::debug!(
            items = items.len(),
            projects = project_rollups.len(),
            assignees = assignee_reports.len(),
            %today,
            "aggregated schedule"
        );

        Ok(ScheduleReport {
            as_of: today,
            projects: project_rollups,
            assignees: assignee_reports,
        })
    }

    // Unassigned items are skipped.
    fn assignee_reports(&self, assessed: &[AssessedItem]) -> Vec<AssigneeWorkloadReport> {
        let mut groups: BTreeMap<i64, (Option<String>, Vec<&AssessedItem>)> = BTreeMap::new();
        for entry in assessed {
            let Some(assignee_id) = entry.item.assignee_id else {
                continue;
            };
            let group = groups.entry(assignee_id).or_default();
            if group.0.is_none() {
                group.0 = entry.item.assignee_name.clone();
            }
            group.1.push(entry);
        }

        groups
            .into_iter()
            .map(|(assignee_id, (name, entries))| {
                AssigneeWorkloadReport::build(
                    assignee_id,
                    name,
                    &entries,
                    &self.thresholds,
                    &self.converter,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::task::WorkStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn aggregate_uses_injected_clock() {
        let aggregator = ScheduleAggregator::new().with_clock(FixedClock(d(2024, 3, 20)));
        let items = vec![
            WorkItem::new(1, 1, WorkStatus::InProgress).with_planned(None, Some(d(2024, 3, 1))),
        ];
        let report = aggregator.aggregate(&items).unwrap();
        assert_eq!(report.as_of, d(2024, 3, 20));
        assert_eq!(report.projects[0].total_delay_days, 19);
    }

    #[test]
    fn summary_line_lists_only_nonzero_counters() {
        let aggregator = ScheduleAggregator::new();
        let items = vec![WorkItem::new(1, 1, WorkStatus::NotStarted)];
        let report = aggregator.aggregate_at(&items, d(2024, 1, 10)).unwrap();
        assert_eq!(report.summary_line(), "as_of=2024-01-10, projects=1, items=1");
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = ScheduleAggregator::new().aggregate_at(&[], d(2024, 1, 10)).unwrap();
        assert!(report.projects.is_empty());
        assert!(report.assignees.is_empty());
        assert_eq!(report.item_count(), 0);
    }
}
