//! Per-subject attendance thresholds and their validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Required attendance percentage applied when a subject does not set one.
pub const DEFAULT_REQUIRED_PERCENT: f64 = 75.0;

/// Hours-equivalent weight of one class session when a subject does not set one.
pub const DEFAULT_ATTENDANCE_WEIGHT: f64 = 1.0;

/// Maximum length of a subject name.
pub const MAX_SUBJECT_NAME_LENGTH: usize = 200;

/// The subject configuration the eligibility calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectThresholds {
    /// Minimum attendance percentage, in `(0, 100]`.
    pub required_percent: f64,
    /// Hours each recorded class counts for (a lab may count double).
    pub weight: f64,
}

impl Default for SubjectThresholds {
    fn default() -> Self {
        Self {
            required_percent: DEFAULT_REQUIRED_PERCENT,
            weight: DEFAULT_ATTENDANCE_WEIGHT,
        }
    }
}

impl SubjectThresholds {
    /// Resolve the thresholds of a possibly-missing subject.
    pub fn or_default(thresholds: Option<Self>) -> Self {
        thresholds.unwrap_or_default()
    }
}

/// Validate that a required percentage lies in `(0, 100]`.
pub fn validate_required_percent(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(CoreError::Validation(format!(
            "Required percentage must be greater than 0 and at most 100, got {value}"
        )));
    }
    Ok(())
}

/// Validate that an attendance weight is a positive finite number.
pub fn validate_weight(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "attendance_weight must be greater than 0, got {value}"
        )));
    }
    Ok(())
}

/// Validate a subject name: non-blank and within the length limit.
pub fn validate_subject_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Subject name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_SUBJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Subject name must be at most {MAX_SUBJECT_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_match_policy() {
        let t = SubjectThresholds::or_default(None);
        assert_eq!(t.required_percent, 75.0);
        assert_eq!(t.weight, 1.0);
    }

    #[test]
    fn required_percent_bounds() {
        assert!(validate_required_percent(100.0).is_ok());
        assert!(validate_required_percent(0.5).is_ok());
        assert!(validate_required_percent(0.0).is_err());
        assert!(validate_required_percent(100.01).is_err());
        assert!(validate_required_percent(f64::NAN).is_err());
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(validate_weight(2.0).is_ok());
        assert_matches!(validate_weight(0.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_weight(-1.0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_names_rejected() {
        assert!(validate_subject_name("Physics").is_ok());
        assert!(validate_subject_name("   ").is_err());
        assert!(validate_subject_name(&"x".repeat(201)).is_err());
    }
}
