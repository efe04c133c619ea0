//! Project field validation rules and status constants.
//!
//! Validation runs at the boundary of each write operation, before anything
//! is persisted. A deadline is checked against "now" only at write time; an
//! already-stored deadline drifting into the past is not an error.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Project is accepting applications.
pub const PROJECT_OPEN: &str = "open";

/// Work has started.
pub const PROJECT_IN_PROGRESS: &str = "in-progress";

/// Work is finished.
pub const PROJECT_COMPLETED: &str = "completed";

/// All valid project status values.
pub const VALID_PROJECT_STATUSES: &[&str] =
    &[PROJECT_OPEN, PROJECT_IN_PROGRESS, PROJECT_COMPLETED];

/// Validate that a project status string is one of the accepted values.
pub fn validate_project_status(status: &str) -> Result<(), CoreError> {
    if VALID_PROJECT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Status must be one of: {}",
            VALID_PROJECT_STATUSES.join(", ")
        )))
    }
}

/// Validate a required text field: non-empty after trimming.
pub fn validate_required_text(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Validate a stipend amount: required and non-negative.
pub fn validate_stipend(stipend: i64) -> Result<(), CoreError> {
    if stipend < 0 {
        Err(CoreError::Validation(
            "Stipend cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate a deadline at write time: it must lie in the future.
pub fn validate_deadline(deadline: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if deadline <= now {
        Err(CoreError::Validation(
            "Deadline must be in the future".to_string(),
        ))
    } else {
        Ok(())
    }
}
