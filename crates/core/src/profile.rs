//! Profile field validation rules for both principal kinds.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Maximum length of a startup description.
pub const MAX_STARTUP_DESCRIPTION_LEN: usize = 500;

/// Valid study years for a student.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 4;

/// Validate an email address shape.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

/// Validate a student's study year.
pub fn validate_year(year: i32) -> Result<(), CoreError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}"
        )))
    }
}

/// Validate a startup description length.
pub fn validate_startup_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_STARTUP_DESCRIPTION_LEN {
        Err(CoreError::Validation(format!(
            "Description must be at most {MAX_STARTUP_DESCRIPTION_LEN} characters"
        )))
    } else {
        Ok(())
    }
}

/// Validate a website URL shape.
pub fn validate_website(website: &str) -> Result<(), CoreError> {
    if website.validate_url() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{website}' is not a valid URL"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_email_shape() {
        assert!(validate_email("jane@campus.edu").is_ok());
        assert_matches!(validate_email("not-an-email"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_year_range() {
        for year in MIN_YEAR..=MAX_YEAR {
            assert!(validate_year(year).is_ok());
        }
        assert_matches!(validate_year(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_year(5), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_description_length() {
        assert!(validate_startup_description("short").is_ok());
        assert!(validate_startup_description(&"x".repeat(MAX_STARTUP_DESCRIPTION_LEN)).is_ok());
        assert_matches!(
            validate_startup_description(&"x".repeat(MAX_STARTUP_DESCRIPTION_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_website_shape() {
        assert!(validate_website("https://example.com").is_ok());
        assert_matches!(validate_website("nope"), Err(CoreError::Validation(_)));
    }
}
