//! Client-side field rules for the todo form. Violations block submission
//! before any request is made.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::datetime::parse_due_input;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    DueDate,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("{field} is too long")]
    TooLong { field: Field, max: usize },

    #[error("{field} is too short (minimum {min} characters)")]
    TooShort { field: Field, min: usize },

    #[error("{0} is not a valid date")]
    InvalidDate(Field),
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(field) | FieldError::InvalidDate(field) => *field,
            FieldError::TooLong { field, .. } | FieldError::TooShort { field, .. } => *field,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First violation reported for `field`, if any.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|err| err.field() == field)
    }

    fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Form values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

pub fn check_title(title: &str) -> Result<(), FieldError> {
    if title.trim().is_empty() {
        return Err(FieldError::Required(Field::Title));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(FieldError::TooLong {
            field: Field::Title,
            max: TITLE_MAX_CHARS,
        });
    }
    Ok(())
}

pub fn check_description(description: &str) -> Result<(), FieldError> {
    if description.trim().is_empty() {
        return Err(FieldError::Required(Field::Description));
    }
    let len = description.chars().count();
    if len < DESCRIPTION_MIN_CHARS {
        return Err(FieldError::TooShort {
            field: Field::Description,
            min: DESCRIPTION_MIN_CHARS,
        });
    }
    if len > DESCRIPTION_MAX_CHARS {
        return Err(FieldError::TooLong {
            field: Field::Description,
            max: DESCRIPTION_MAX_CHARS,
        });
    }
    Ok(())
}

pub fn check_due(due: &str) -> Result<DateTime<Utc>, FieldError> {
    if due.trim().is_empty() {
        return Err(FieldError::Required(Field::DueDate));
    }
    parse_due_input(due).ok_or(FieldError::InvalidDate(Field::DueDate))
}

pub fn validate(title: &str, description: &str, due: &str) -> Result<ValidFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Err(err) = check_title(title) {
        errors.push(err);
    }
    if let Err(err) = check_description(description) {
        errors.push(err);
    }
    let due_date = match check_due(due) {
        Ok(due_date) => Some(due_date),
        Err(err) => {
            errors.push(err);
            None
        }
    };

    match due_date {
        Some(due_date) if errors.is_empty() => Ok(ValidFields {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_DESCRIPTION: &str = "Get milk from the store today";

    #[test]
    fn accepts_boundary_lengths() {
        let title = "t".repeat(TITLE_MAX_CHARS);
        let description = "d".repeat(DESCRIPTION_MIN_CHARS);
        assert!(validate(&title, &description, "2025-01-01").is_ok());

        let description = "d".repeat(DESCRIPTION_MAX_CHARS);
        assert!(validate("ok", &description, "2025-01-01").is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let errors = validate("", "short", "").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.for_field(Field::Title),
            Some(&FieldError::Required(Field::Title))
        );
        assert_eq!(
            errors.for_field(Field::Description).map(ToString::to_string),
            Some("description is too short (minimum 10 characters)".to_string())
        );
        assert_eq!(
            errors.for_field(Field::DueDate).map(ToString::to_string),
            Some("dueDate is required".to_string())
        );
    }

    #[test]
    fn title_over_limit_is_too_long() {
        let title = "x".repeat(TITLE_MAX_CHARS + 1);
        let errors = validate(&title, GOOD_DESCRIPTION, "2025-01-01").unwrap_err();
        assert_eq!(errors.to_string(), "title is too long");
    }

    #[test]
    fn description_over_limit_is_too_long() {
        let description = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errors = validate("Title", &description, "2025-01-01").unwrap_err();
        assert_eq!(
            errors.for_field(Field::Description),
            Some(&FieldError::TooLong {
                field: Field::Description,
                max: DESCRIPTION_MAX_CHARS,
            })
        );
    }

    #[test]
    fn blank_title_counts_as_missing() {
        assert_eq!(check_title("   "), Err(FieldError::Required(Field::Title)));
    }

    #[test]
    fn blank_description_counts_as_missing() {
        let padding = " ".repeat(DESCRIPTION_MIN_CHARS + 2);
        assert_eq!(
            check_description(&padding),
            Err(FieldError::Required(Field::Description))
        );
        assert!(check_description("  ten chars ok  ").is_ok());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let title = "é".repeat(TITLE_MAX_CHARS);
        assert!(check_title(&title).is_ok());
    }

    #[test]
    fn unparseable_due_is_rejected() {
        assert_eq!(
            check_due("next week"),
            Err(FieldError::InvalidDate(Field::DueDate))
        );
    }
}
