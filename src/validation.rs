//! Field checks shared by the intake forms.

use crate::service::error::ServiceError;

const MAX_EMAIL_LENGTH: usize = 254;

/// Returns the trimmed value of a required text field.
pub fn required(field: &str, value: Option<&str>) -> Result<String, ServiceError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ServiceError::Validation {
            field: field.to_string(),
            message: format!("{} is required", capitalize(field)),
        }),
    }
}

/// Returns the trimmed value of an optional text field, or `None` when blank.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Returns the trimmed address when it looks like `local@domain.tld`.
pub fn email(value: Option<&str>) -> Result<String, ServiceError> {
    let invalid = || ServiceError::Validation {
        field: "email".to_string(),
        message: "Invalid email address".to_string(),
    };

    let email = value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(invalid)?;
    if is_valid_email(email) {
        Ok(email.to_string())
    } else {
        Err(invalid())
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain needs at least two non-empty labels.
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
