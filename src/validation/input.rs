//! Input validation for a unit floor.
//!
//! Checks structural integrity of the roster and room list before
//! scheduling. Detects:
//! - Roster sizes the engine cannot schedule
//! - Blank or duplicate nurse names (assignments are keyed by name)
//! - Blank or duplicate room numbers and duplicate room ids
//! - Previous-shift nurses that are not on the roster
//!
//! None of these stop the engine from running on a valid [`Roster`]; they
//! are reported so a caller can reject the floor before it gets that far.
//!
//! [`Roster`]: crate::models::Roster

use crate::models::Room;
use std::collections::HashSet;

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
    /// Roster is not 5, 6, or 7 nurses.
    InvalidRosterSize,
    /// A nurse name is empty or whitespace.
    BlankNurseName,
    /// Two roster entries share a name.
    DuplicateNurse,
    /// A room number is empty or whitespace.
    BlankRoomNumber,
    /// Two rooms share a number.
    DuplicateRoomNumber,
    /// Two rooms share an id.
    DuplicateRoomId,
    /// A room's previous nurse is not on the roster.
    UnknownPreviousNurse,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the roster names and room list for a shift.
///
/// Checks:
/// 1. Roster size is 5, 6, or 7
/// 2. No blank nurse names
/// 3. No duplicate nurse names
/// 4. No blank room numbers
/// 5. No duplicate room numbers or room ids
/// 6. Every `previous_nurse` is on the roster
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input<S: AsRef<str>>(nurse_names: &[S], rooms: &[Room]) -> ValidationResult {
    let mut errors = Vec::new();

    if !(5..=7).contains(&nurse_names.len()) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRosterSize,
            format!("Roster has {} nurses, expected 5, 6, or 7", nurse_names.len()),
        ));
    }

    let mut names = HashSet::new();
    for (index, name) in nurse_names.iter().map(AsRef::as_ref).enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankNurseName,
                format!("Nurse at position {} has no name", index + 1),
            ));
            continue;
        }
        if !names.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateNurse,
                format!("Duplicate nurse name: {name}"),
            ));
        }
    }

    let mut numbers = HashSet::new();
    let mut ids = HashSet::new();
    for room in rooms {
        if room.number.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankRoomNumber,
                format!("Room '{}' has no number", room.id),
            ));
        } else if !numbers.insert(room.number.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomNumber,
                format!("Duplicate room number: {}", room.number),
            ));
        }

        if !ids.insert(room.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRoomId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }

        if let Some(previous) = room.previous_nurse.as_deref() {
            if !names.contains(previous) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPreviousNurse,
                    format!(
                        "Room {} references unknown previous nurse '{}'",
                        room.number, previous
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
