//! Input validation helpers
//!
//! Length limits mirror the column sizes the mini-app and dashboard
//! expect; SQLite itself enforces none of them.

use shared::AppError;

/// Entity names: store, table number, category, menu item
pub const MAX_NAME_LEN: usize = 200;

/// Diner notes, staff call messages, descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// QR identifiers and image paths
pub const MAX_URL_LEN: usize = 255;

/// Chat and user identifiers handed over by the bot platform
pub const MAX_CHAT_ID_LEN: usize = 50;

/// Telegram usernames
pub const MAX_USERNAME_LEN: usize = 150;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Diners at one table
pub const PARTY_SIZE_RANGE: std::ops::RangeInclusive<i32> = 1..=99;

/// Portions of one line in a cart
pub const LINE_QUANTITY_RANGE: std::ops::RangeInclusive<i32> = 1..=99;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an integer lies inside an inclusive range.
pub fn validate_range(
    value: i32,
    field: &str,
    range: std::ops::RangeInclusive<i32>,
) -> Result<(), AppError> {
    if !range.contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between {} and {}",
            range.start(),
            range.end()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(validate_required_text("   ", "qr_code_url", MAX_URL_LEN).is_err());
        assert!(validate_required_text("table-a1", "qr_code_url", MAX_URL_LEN).is_ok());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let note = "辛".repeat(MAX_NOTE_LEN);
        assert!(validate_optional_text(&Some(note), "note", MAX_NOTE_LEN).is_ok());
        let long = "a".repeat(MAX_NOTE_LEN + 1);
        assert!(validate_optional_text(&Some(long), "note", MAX_NOTE_LEN).is_err());
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn test_range() {
        assert!(validate_range(0, "party_size", PARTY_SIZE_RANGE).is_err());
        assert!(validate_range(1, "party_size", PARTY_SIZE_RANGE).is_ok());
        assert!(validate_range(99, "party_size", PARTY_SIZE_RANGE).is_ok());
        let err = validate_range(100, "party_size", PARTY_SIZE_RANGE).unwrap_err();
        assert_eq!(err.message, "party_size must be between 1 and 99");
    }
}
