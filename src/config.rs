use crate::calculations::delay::DEFAULT_WARNING_WINDOW_DAYS;
use crate::effort::{BUSINESS_DAYS_PER_MONTH_BASELINE, HOURS_PER_DAY};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Active-item counts at which an assignee moves up a workload level.
///
/// `0` is always LOW, `1..=normal_max` NORMAL, `normal_max+1..=high_max`
/// HIGH and anything above `high_max` OVERLOAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadThresholds {
    pub normal_max: usize,
    pub high_max: usize,
}

impl Default for WorkloadThresholds {
    fn default() -> Self {
        Self {
            normal_max: 3,
            high_max: 6,
        }
    }
}

/// Tunables for the analytics engine. Every field has a default, so a
/// partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours in one person-day.
    pub hours_per_day: f64,
    /// Fixed business-day divisor for person-month display.
    pub person_month_days: f64,
    /// Unfinished items due within this many days are flagged as a warning.
    pub warning_window_days: i64,
    pub workload: WorkloadThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hours_per_day: HOURS_PER_DAY,
            person_month_days: BUSINESS_DAYS_PER_MONTH_BASELINE,
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
            workload: WorkloadThresholds::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_reader<R: Read>(reader: R) -> EngineResult<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "hours_per_day must be positive (got {})",
                self.hours_per_day
            )));
        }
        if !self.person_month_days.is_finite() || self.person_month_days <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "person_month_days must be positive (got {})",
                self.person_month_days
            )));
        }
        if self.warning_window_days < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "warning_window_days must not be negative (got {})",
                self.warning_window_days
            )));
        }
        if self.workload.normal_max > self.workload.high_max {
            return Err(EngineError::InvalidConfig(format!(
                "workload.normal_max {} exceeds workload.high_max {}",
                self.workload.normal_max, self.workload.high_max
            )));
        }
        Ok(())
    }
}
