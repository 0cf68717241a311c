use crate::task::WorkItem;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

fn validate_hours(item: &WorkItem, field: &str, hours: f64) -> Result<(), TaskValidationError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(TaskValidationError::new(format!(
            "work item {} has invalid {} {} (must be a finite value >= 0)",
            item.id, field, hours
        )));
    }
    Ok(())
}

/// Required fields only: optional associations and dates may be absent.
pub fn validate_work_item(item: &WorkItem) -> Result<(), TaskValidationError> {
    if item.id <= 0 {
        return Err(TaskValidationError::new(format!(
            "work item id must be positive (got {})",
            item.id
        )));
    }
    if item.project_id <= 0 {
        return Err(TaskValidationError::new(format!(
            "work item {} has invalid project id {}",
            item.id, item.project_id
        )));
    }
    validate_hours(item, "estimated_hours", item.estimated_hours)?;
    validate_hours(item, "actual_hours", item.actual_hours)?;
    Ok(())
}

pub fn validate_work_items(items: &[WorkItem]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate work item id {}",
                item.id
            )));
        }
        validate_work_item(item)?;
    }
    Ok(())
}
