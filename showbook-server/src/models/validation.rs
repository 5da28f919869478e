//! Validation error types and the field checks shared by every form

use std::fmt;

/// Maximum length for ordinary text fields
pub const MAX_TEXT_LEN: usize = 120;

/// Maximum length for image links
pub const MAX_LINK_LEN: usize = 500;

/// Validation error for submitted forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't parse as the expected type
    InvalidFormat { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed, non-blank value no longer than `max` characters.
pub fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    match optional_text(field, value, max)? {
        Some(text) => Ok(text),
        None => Err(ValidationError::Empty { field }),
    }
}

/// Trimmed value no longer than `max` characters; blank becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 120 characters"
        );
    }

    #[test]
    fn required_rejects_missing_and_blank() {
        assert_eq!(
            required_text("city", None, MAX_TEXT_LEN),
            Err(ValidationError::Empty { field: "city" })
        );
        assert_eq!(
            required_text("city", Some("   ".into()), MAX_TEXT_LEN),
            Err(ValidationError::Empty { field: "city" })
        );
        assert_eq!(
            required_text("city", Some(" Austin ".into()), MAX_TEXT_LEN).unwrap(),
            "Austin"
        );
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional_text("phone", Some("".into()), 120), Ok(None));
        assert_eq!(optional_text("phone", None, 120), Ok(None));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(120);
        assert!(required_text("name", Some(name), MAX_TEXT_LEN).is_ok());
        let name = "é".repeat(121);
        assert!(matches!(
            required_text("name", Some(name), MAX_TEXT_LEN),
            Err(ValidationError::TooLong { max: 120, .. })
        ));
    }
}
