//! Input validation for season planning.
//!
//! Checks the roster and season parameters before any round is
//! generated. Detects:
//! - An empty roster
//! - Duplicate participant names
//! - Non-positive or non-finite fairness weights
//! - Zero courts
//! - An end date before the start date
//! - A zero-day date interval

use std::collections::HashSet;

use crate::models::Participant;
use crate::season::SeasonConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The roster has no participants.
    EmptyRoster,
    /// Two participants share the same name.
    DuplicateName,
    /// A weight is zero, negative, NaN or infinite.
    InvalidWeight,
    /// The season has no courts.
    NoCourts,
    /// The season ends before it starts.
    InvalidDateRange,
    /// Dates would not advance (zero-day interval).
    InvalidInterval,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the roster and season parameters.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(participants: &[Participant], config: &SeasonConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if participants.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "Roster has no participants",
        ));
    }

    let mut names = HashSet::new();
    for p in participants {
        if !names.insert(p.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate participant name: {}", p.name()),
            ));
        }
        if !(p.weight().is_finite() && p.weight() > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeight,
                format!("Participant '{}' has invalid weight {}", p.name(), p.weight()),
            ));
        }
    }

    if config.courts == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoCourts,
            "Season needs at least one court",
        ));
    }

    if config.end < config.start {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDateRange,
            format!("Season ends ({}) before it starts ({})", config.end, config.start),
        ));
    }

    if config.interval_days == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidInterval,
            "Date interval must be at least one day",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
