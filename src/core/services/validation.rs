//! Creation payload validation

use chrono::NaiveDate;

use crate::core::models::{NewRequest, is_valid_institution_id};
use crate::core::{Result, WorkflowError};

/// Longest accepted free-text field
pub const MAX_FIELD_LEN: usize = 200;

/// Check a creation payload for missing or malformed fields
///
/// `today` bounds the graduation date.
pub fn validate_new_request(new: &NewRequest, today: NaiveDate) -> Result<()> {
    required("target institution", &new.target_institution_id)?;
    if !is_valid_institution_id(&new.target_institution_id) {
        return Err(WorkflowError::validation(format!(
            "Invalid target institution id '{}'",
            new.target_institution_id
        )));
    }
    if let Some(requesting) = new
        .requesting_institution_id
        .as_deref()
        .filter(|id| !is_valid_institution_id(id))
    {
        return Err(WorkflowError::validation(format!(
            "Invalid requesting institution id '{requesting}'"
        )));
    }

    required("student name", &new.student_name)?;
    required("student id", &new.student_id)?;
    required("program name", &new.program_name)?;

    if new.graduation_date > today {
        return Err(WorkflowError::validation(format!(
            "Graduation date {} is in the future",
            new.graduation_date
        )));
    }

    Ok(())
}

fn required(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WorkflowError::validation(format!("Missing required field: {field}")));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(WorkflowError::validation(format!(
            "Field {field} is longer than {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(())
}
